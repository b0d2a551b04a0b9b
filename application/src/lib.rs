//! Application layer for therabot-chat
//!
//! This crate contains the chat client use case and the port definitions it
//! talks through. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, ChatReply, GatewayError, StreamHandle},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    transcript_printer::{NoTranscriptPrinter, PrintError, PrintReceipt, TranscriptPrinter},
    ui_event::{ScrollTrigger, UiEvent},
};
pub use use_cases::chat_client::{
    ChatClient, ChatError, InitOutcome, SendOutcome, SEND_FAILED_MESSAGE,
    SESSION_INIT_FAILED_MESSAGE,
};
