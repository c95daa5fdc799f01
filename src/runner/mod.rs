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

//! Runner module for the external assembler and file watching.
//!
//! This module provides functionality to:
//! - Locate and run the Krakatau assembler on generated files
//! - Watch source files for changes

mod krakatau;
mod watcher;

pub use krakatau::{find_assembler, Assembler, AssemblerOutput, ASSEMBLER_BINARIES};
pub use watcher::SourceWatcher;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The assembler was not found on the system.
    #[error("Krakatau assembler not found. Install krakatau or specify path with --assembler-path")]
    AssemblerNotFound,

    /// The specified assembler path does not exist.
    #[error("Assembler path does not exist: {0}")]
    InvalidAssemblerPath(PathBuf),

    /// The assembler could not be started.
    #[error("Failed to start assembler: {0}")]
    AssemblerStartFailed(#[from] io::Error),

    /// Error watching files.
    #[error("File watch error: {0}")]
    WatchError(String),
}
