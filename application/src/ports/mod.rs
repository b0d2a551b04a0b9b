//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod chat_gateway;
pub mod conversation_logger;
pub mod transcript_printer;
pub mod ui_event;
