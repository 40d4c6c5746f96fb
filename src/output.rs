//! # Completion Signal
//!
//! Written only after the record has been stored: `{"finished": true}`,
//! either to the requested output file or to stdout.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub finished: bool,
}

impl Completion {
    /// Emit the signal
    ///
    /// # Errors
    /// Returns an error if the output file or stdout cannot be written
    pub fn emit(&self, output: Option<&Path>) -> Result<()> {
        let body = serde_json::to_string(self).context("Failed to serialize completion signal")?;
        match output {
            Some(path) => std::fs::write(path, format!("{body}\n"))
                .with_context(|| format!("Failed to write {}", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{body}").context("Failed to write to stdout")
            }
        }
    }
}
