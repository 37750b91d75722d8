//! Error types for the line-editing pipeline.
//!
//! Only [`LineError::Usage`] stops a run. Every other variant is recorded,
//! logged, and the pipeline carries on to the next step.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why usage text is shown instead of processing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageReason {
    /// No arguments at all.
    NoArguments,
    /// First argument asked for help (`/help`, `/?`, ...).
    HelpRequested,
    /// `filename` was empty once reserved characters were removed.
    EmptyFilename,
}

/// Everything that can go wrong while editing a file.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("usage requested: {0:?}")]
    Usage(UsageReason),

    #[error("the filename: {} could not be read because it doesn't exist", path.display())]
    SourceNotFound { path: PathBuf },

    #[error(
        "there was an error while parsing the trailer line '{line}' to an integer to know the number of lines in the file"
    )]
    TrailerParse { line: String },

    #[error("there was an error while reading the file {}: {source}", path.display())]
    ReadIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line_number} has no separator, first column left in place: '{line}'")]
    ColumnStrip { line_number: usize, line: String },

    #[error("the filename {} cannot be written: {source}", path.display())]
    WriteIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LineError {
    /// True for the one error that ends a run before any file is touched.
    pub fn is_usage(&self) -> bool {
        matches!(self, LineError::Usage(_))
    }
}
