// Yava - A compiler for a small Java-like language emitting JVM assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Yava Compiler CLI
//!
//! Compiles one source file to Krakatau assembly and runs the assembler on it.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use yava::error::format_error;
use yava::output::{program_name, write_assembly, DEFAULT_OUTPUT_DIR};
use yava::runner::{Assembler, RunnerError, SourceWatcher};

/// Yava - A compiler for a small Java-like language
#[derive(Parser, Debug)]
#[command(name = "yava")]
#[command(version)]
#[command(about = "Compiles a small Java-like language to Krakatau JVM assembly")]
#[command(long_about = r#"
Yava compiles a source file written in a small subset of Java into
Krakatau assembly (.j) and hands the result to the Krakatau assembler,
which produces one .class file per class and interface.

Example usage:
  yava Speak.java
  yava Speak.java -o build -n Speak
  yava Speak.java --no-assemble

Watch mode:
  yava Speak.java --watch
"#)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Directory for the generated assembly and class files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Name of the assembly file (defaults to the source file name)
    #[arg(short, long)]
    name: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only write the assembly file, do not run the assembler
    #[arg(long)]
    no_assemble: bool,

    /// Path to the Krakatau assembler (auto-detected if not specified)
    #[arg(long)]
    assembler_path: Option<PathBuf>,

    /// Watch the source file and recompile on changes
    #[arg(short, long)]
    watch: bool,
}

/// Exit codes of the CLI.
mod exit {
    pub const COMPILE_ERROR: u8 = 1;
    pub const WRITE_ERROR: u8 = 2;
    pub const READ_ERROR: u8 = 3;
    pub const ASSEMBLER_NOT_FOUND: u8 = 4;
    pub const ASSEMBLER_FAILED: u8 = 5;
    pub const WATCH_ERROR: u8 = 6;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Compiler v{}", yava::NAME, yava::VERSION);
        println!("Source: {}", cli.source.display());
        println!("Output directory: {}", cli.output_dir.display());
        println!();
    }

    let result = build(&cli);

    if !cli.watch {
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(code) => ExitCode::from(code),
        };
    }

    run_watch_loop(&cli)
}

/// Read, compile, write and assemble once.
///
/// Diagnostics are printed here; the error value is the exit code.
fn build(cli: &Cli) -> Result<(), u8> {
    let source_name = cli
        .source
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    if cli.verbose {
        println!("Reading {}...", cli.source.display());
    }
    let source = std::fs::read_to_string(&cli.source).map_err(|e| {
        eprintln!("Error: Cannot read {}: {}", cli.source.display(), e);
        exit::READ_ERROR
    })?;

    if cli.verbose {
        println!("Compiling...");
    }
    let text = yava::compile(&source).map_err(|errors| {
        eprintln!("Errors:");
        for error in &errors {
            eprint!("{}", format_error(error, &source, Some(source_name)));
        }
        exit::COMPILE_ERROR
    })?;

    let name = cli
        .name
        .as_deref()
        .unwrap_or_else(|| program_name(&cli.source));
    let path = write_assembly(&text, &cli.output_dir, name).map_err(|e| {
        eprintln!(
            "Error: Cannot write {}: {}",
            cli.output_dir.join(name).display(),
            e
        );
        exit::WRITE_ERROR
    })?;

    if cli.verbose {
        println!("Wrote {} ({} lines)", path.display(), text.lines().count());
    }

    if !cli.no_assemble {
        assemble(cli, &path)?;
    }

    if cli.verbose {
        println!("Done!");
    } else {
        println!("Compiled {} -> {}", source_name, path.display());
    }
    Ok(())
}

/// Run the assembler on a written file and echo what it printed.
fn assemble(cli: &Cli, path: &Path) -> Result<(), u8> {
    let assembler = Assembler::locate(cli.assembler_path.as_deref()).map_err(|e| {
        eprintln!("Error: {}", e);
        if matches!(e, RunnerError::AssemblerNotFound) {
            eprintln!();
            eprintln!("Install Krakatau or specify the path with --assembler-path,");
            eprintln!("or pass --no-assemble to only write the assembly file.");
        }
        exit::ASSEMBLER_NOT_FOUND
    })?;

    if cli.verbose {
        println!("Assembling with {}...", assembler.path().display());
    }

    let output = assembler.assemble(path).map_err(|e| {
        eprintln!("Error: {}", e);
        exit::ASSEMBLER_FAILED
    })?;

    print!("{}", output.stdout);
    eprint!("{}", output.stderr);

    if !output.success() {
        eprintln!("Error: Assembler exited with {}", output.status);
        return Err(exit::ASSEMBLER_FAILED);
    }
    Ok(())
}

/// Recompile whenever the source file changes.
fn run_watch_loop(cli: &Cli) -> ExitCode {
    let watcher = match SourceWatcher::new(&cli.source) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return ExitCode::from(exit::WATCH_ERROR);
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        if let Err(e) = watcher.wait_for_change() {
            eprintln!("Watch error: {}", e);
            continue;
        }

        println!();
        if cli.verbose {
            println!("Change detected, recompiling...");
        } else {
            println!("Recompiling...");
        }

        if build(cli).is_err() {
            println!("Fix errors and save to retry.");
            continue;
        }
        println!("Watching for changes...");
    }
}
