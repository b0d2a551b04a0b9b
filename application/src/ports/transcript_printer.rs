//! Port for printing the transcript.
//!
//! A printer produces a static, styled copy of every current message and
//! hands it to whatever print facility the platform offers.

use std::path::{Path, PathBuf};
use therabot_domain::Transcript;
use thiserror::Error;

/// Errors that can occur while printing
#[derive(Error, Debug)]
pub enum PrintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No print directory available")]
    NoDirectory,

    #[error("Printing is not available")]
    Unavailable,
}

/// Where the print view ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintReceipt {
    /// File holding the print view
    pub location: PathBuf,
    /// Whether a viewer was launched on it
    pub opened: bool,
}

/// Port for printing a transcript.
pub trait TranscriptPrinter: Send + Sync {
    /// Print `transcript`, writing the view to `destination` when given.
    fn print(
        &self,
        transcript: &Transcript,
        destination: Option<&Path>,
    ) -> Result<PrintReceipt, PrintError>;
}

/// Printer used when no print facility is wired in.
pub struct NoTranscriptPrinter;

impl TranscriptPrinter for NoTranscriptPrinter {
    fn print(
        &self,
        _transcript: &Transcript,
        _destination: Option<&Path>,
    ) -> Result<PrintReceipt, PrintError> {
        Err(PrintError::Unavailable)
    }
}
