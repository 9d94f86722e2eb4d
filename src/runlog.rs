//! The per-run log: a plain-text record of everything a run retrieved.
//!
//! Each line is written as `INFO: {message}` to the log file and mirrored to
//! standard output, in emission order. The file opens in append mode, so
//! repeated runs against the same collection extend a single record. This is
//! the run's artifact; diagnostic tracing goes to standard error separately.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Append-only sink for run log lines.
#[derive(Debug)]
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Opens the run log at `path`, creating the file when absent and
    /// appending when it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened for writing, for
    /// example when the output directory does not exist.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The path the log file was opened at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one `INFO: {message}` line to the file and to standard output.
    ///
    /// Lines are flushed as they are written, so the file is complete up to
    /// the last emitted line even when a run aborts.
    ///
    /// # Errors
    ///
    /// Returns the first write or flush failure on either sink.
    pub fn info(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        let message = message.as_ref();
        writeln!(self.file, "INFO: {message}")?;
        self.file.flush()?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "INFO: {message}")?;
        handle.flush()
    }
}

/// The current local time in ISO-8601 form with microseconds, as recorded in
/// the `Start run` and `End run` lines.
#[must_use]
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
