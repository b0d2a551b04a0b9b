//! Domain layer for therabot-chat
//!
//! This crate contains the core entities and value objects of the chat client.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The transcript is the ordered, append-only log of [`Message`]s shown to the
//! user. Messages appear in the order they were created; the only in-place
//! mutation is appending a streamed delta to the bot message being built.
//!
//! ## Session
//!
//! The server owns the session (identified by a cookie). The client only sees
//! the [`Welcome`] text returned when a session is created, the
//! [`StreamChunk`]s of a streamed reply, and its own [`ClientPhase`].

pub mod config;
pub mod core;
pub mod message;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, ResponseMode, Severity};
pub use core::{error::DomainError, outgoing::OutgoingMessage};
pub use message::{
    entities::{Message, Role},
    markup::{escape_html, Markup},
    transcript::Transcript,
};
pub use session::{
    phase::ClientPhase,
    stream::{FrameError, StreamChunk},
    welcome::{Welcome, WelcomeText, DISCLAIMER_PHRASE},
};
