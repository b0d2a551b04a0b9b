//! Infrastructure layer for therabot-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod print;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePrintConfig, FileServerConfig, FileTuiConfig,
};
pub use http::{
    error::{HttpError, Result},
    frame::FrameDecoder,
    gateway::HttpChatGateway,
};
pub use logging::JsonlConversationLogger;
pub use print::{HtmlTranscriptPrinter, render_document};
