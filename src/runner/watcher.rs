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

//! Source file watching for `--watch`.
//!
//! Editors save in different ways: some truncate and rewrite the file,
//! others write a temporary file and rename it over the original. Watching
//! the parent directory and filtering by file name catches both.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::RunnerError;

/// Changes arriving within this window after the first one are merged.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Watches one source file for changes.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use yava::runner::SourceWatcher;
///
/// let watcher = SourceWatcher::new(Path::new("Speak.java")).expect("Failed to create watcher");
/// watcher.wait_for_change().expect("Watch error");
/// println!("Speak.java changed");
/// ```
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<Result<Event, notify::Error>>,
    /// Canonical path of the watched file.
    path: PathBuf,
}

impl SourceWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::WatchError` if the path cannot be resolved or
    /// its directory cannot be watched.
    pub fn new(path: &Path) -> Result<Self, RunnerError> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(tx)
            .map_err(|e| RunnerError::WatchError(format!("Failed to create watcher: {}", e)))?;

        let path = path.canonicalize().map_err(|e| {
            RunnerError::WatchError(format!("Cannot resolve path {}: {}", path.display(), e))
        })?;
        let dir = path.parent().ok_or_else(|| {
            RunnerError::WatchError(format!("{} has no parent directory", path.display()))
        })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| RunnerError::WatchError(format!("Failed to watch {}: {}", dir.display(), e)))?;

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    /// The canonical path of the watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the watched file is created or modified.
    pub fn wait_for_change(&self) -> Result<(), RunnerError> {
        loop {
            let event = self
                .rx
                .recv()
                .map_err(|e| RunnerError::WatchError(format!("Watch channel closed: {}", e)))?
                .map_err(|e| RunnerError::WatchError(format!("Watch error: {}", e)))?;

            if !self.is_relevant(&event) {
                continue;
            }

            std::thread::sleep(DEBOUNCE_DURATION);
            while self.rx.try_recv().is_ok() {}
            return Ok(());
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return false;
        }

        // renamed files may not resolve yet, so compare by name within the directory
        event.paths.iter().any(|changed| {
            let changed = changed.canonicalize().unwrap_or_else(|_| changed.clone());
            changed == self.path
                || (changed.file_name() == self.path.file_name()
                    && changed.parent() == self.path.parent())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_source_watcher_new() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Test.java");
        File::create(&file_path).unwrap();

        let watcher = SourceWatcher::new(&file_path).unwrap();
        assert_eq!(watcher.path(), file_path.canonicalize().unwrap());
    }

    #[test]
    fn test_source_watcher_nonexistent_file() {
        let result = SourceWatcher::new(Path::new("/nonexistent/path/File.java"));
        assert!(matches!(result, Err(RunnerError::WatchError(_))));
    }

    #[test]
    fn test_file_change_detection() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Watched.java");
        fs::write(&file_path, "class A {}\n").unwrap();

        let watcher = SourceWatcher::new(&file_path).unwrap();

        let changed_path = file_path.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            let mut file = fs::OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&changed_path)
                .unwrap();
            writeln!(file, "class B {{}}").unwrap();
        });

        let result = watcher.wait_for_change();
        handle.join().unwrap();

        assert!(result.is_ok(), "Should detect file change");
    }
}
