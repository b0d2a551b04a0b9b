//! Chat session domain.
//!
//! - [`welcome::Welcome`]: text returned when the server creates a session
//! - [`stream::StreamChunk`]: one parsed frame of a streamed reply
//! - [`phase::ClientPhase`]: what the client is currently waiting for

pub mod phase;
pub mod stream;
pub mod welcome;
