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

//! Output module for the Yava compiler.
//!
//! Writes generated assembly text to `<dir>/<name>.j`, creating the
//! directory when needed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "_bin";

/// File extension of assembly files.
pub const ASSEMBLY_EXTENSION: &str = "j";

/// The path an assembly file for `name` is written to.
pub fn assembly_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, ASSEMBLY_EXTENSION))
}

/// Write assembly text, returning the path of the written file.
pub fn write_assembly(text: &str, dir: &Path, name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = assembly_path(dir, name);
    fs::write(&path, text)?;
    Ok(path)
}

/// The program name to use for a source file: its file stem.
pub fn program_name(source: &Path) -> &str {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Main")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_assembly_path() {
        assert_eq!(
            assembly_path(Path::new("_bin"), "Speak"),
            PathBuf::from("_bin/Speak.j")
        );
    }

    #[test]
    fn test_write_assembly_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("out").join("nested");

        let path = write_assembly(".class public A\n", &dir, "A").unwrap();

        assert_eq!(path, dir.join("A.j"));
        assert_eq!(fs::read_to_string(&path).unwrap(), ".class public A\n");
    }

    #[test]
    fn test_write_assembly_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        write_assembly("old", temp_dir.path(), "A").unwrap();
        let path = write_assembly("new", temp_dir.path(), "A").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name(Path::new("demos/Fib.java")), "Fib");
        assert_eq!(program_name(Path::new("Speak")), "Speak");
    }
}
