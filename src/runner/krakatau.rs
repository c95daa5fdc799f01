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

//! Krakatau assembler detection and invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use super::RunnerError;

/// Assembler binary names to search for, in order of preference.
pub const ASSEMBLER_BINARIES: &[&str] = &["krakatau-assemble"];

/// Find the assembler on the system.
///
/// Searches for the binaries in [`ASSEMBLER_BINARIES`] in the system PATH and
/// returns the first one found.
///
/// # Example
///
/// ```no_run
/// use yava::runner::find_assembler;
///
/// if let Some(path) = find_assembler() {
///     println!("Found assembler: {}", path.display());
/// }
/// ```
pub fn find_assembler() -> Option<PathBuf> {
    ASSEMBLER_BINARIES
        .iter()
        .find_map(|binary| which::which(binary).ok())
}

/// Captured result of one assembler run.
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Exit status of the assembler process.
    pub status: ExitStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl AssemblerOutput {
    /// Whether the assembler exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs the external assembler on generated files.
#[derive(Debug, Clone)]
pub struct Assembler {
    path: PathBuf,
}

impl Assembler {
    /// Create an assembler for the binary at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Use an explicit binary path, or search PATH when none is given.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::InvalidAssemblerPath` if an explicit path does not
    /// exist and `RunnerError::AssemblerNotFound` if the search finds nothing.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, RunnerError> {
        match explicit {
            Some(path) if path.exists() => Ok(Self::new(path.to_path_buf())),
            Some(path) => Err(RunnerError::InvalidAssemblerPath(path.to_path_buf())),
            None => find_assembler()
                .map(Self::new)
                .ok_or(RunnerError::AssemblerNotFound),
        }
    }

    /// Get the assembler binary path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assemble one file.
    ///
    /// The assembler runs in the file's directory with the bare file name as
    /// its argument, so class files land next to the assembly.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::AssemblerStartFailed` if the process cannot be started.
    pub fn assemble(&self, file: &Path) -> Result<AssemblerOutput, RunnerError> {
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let name = file.file_name().unwrap_or(file.as_os_str());

        let output = Command::new(&self.path)
            .arg(name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()?;

        Ok(AssemblerOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
