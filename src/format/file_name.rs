//! File name formatter for rotating file sinks

use super::entity::EvalContext;
use super::text_formatter::TextFormatter;
use crate::core::{LogError, Result};
use std::path::PathBuf;

/// A [`TextFormatter`] that produces file paths
///
/// The template must contain a counter so that a rotation never lands on a
/// file name already in use.
#[derive(Debug, Clone)]
pub struct FileNameFormatter {
    formatter: TextFormatter,
}

impl FileNameFormatter {
    pub fn new(formatter: TextFormatter) -> Result<Self> {
        if !formatter.contains_counter() {
            return Err(LogError::config(
                "FileNameFormatter",
                "file name template must contain a counter",
            ));
        }
        Ok(Self { formatter })
    }

    /// The path the next write would go to, without advancing counters
    pub fn peek(&self) -> Result<PathBuf> {
        self.formatter
            .format_with(&EvalContext::peek(None))
            .map(PathBuf::from)
    }

    /// Advance counters until the path does not exist on disk
    pub fn commit(&self) -> Result<PathBuf> {
        loop {
            let path = PathBuf::from(self.formatter.format_with(&EvalContext::commit(None))?);
            if !path.exists() {
                return Ok(path);
            }
        }
    }

    pub fn reset_counters(&self) {
        self.formatter.reset_counters();
    }

    pub fn formatter(&self) -> &TextFormatter {
        &self.formatter
    }
}
