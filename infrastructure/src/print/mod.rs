//! Print view: static HTML copy of the transcript.
//!
//! Provides [`HtmlTranscriptPrinter`], which implements the
//! [`TranscriptPrinter`](therabot_application::TranscriptPrinter) port.

mod html_printer;

pub use html_printer::{HtmlTranscriptPrinter, render_document};
