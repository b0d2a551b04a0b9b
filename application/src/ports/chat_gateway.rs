//! Chat Gateway port
//!
//! Defines the interface for talking to the chat server.

use async_trait::async_trait;
use therabot_domain::{FrameError, StreamChunk, Welcome};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Server returned status {status}")]
    Status { status: u16 },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Malformed stream frame: {0}")]
    MalformedFrame(#[from] FrameError),

    /// The server reported an error inside a streamed reply.
    #[error("Server error: {0}")]
    Server(String),

    #[error("Stream ended before any reply text")]
    EmptyStream,

    #[error("Other error: {0}")]
    Other(String),
}

/// Reply to a submitted message.
#[derive(Debug)]
pub enum ChatReply {
    /// Whole-response mode: the `response` field of a single JSON body.
    Whole(String),
    /// Streaming mode: chunks arrive as the body is read.
    Streaming(StreamHandle),
}

/// Gateway for chat server communication
///
/// This port defines how the application layer reaches the chat server.
/// Implementations (adapters) live in the infrastructure layer. The
/// server tracks the session itself, so implementations must keep whatever
/// state it hands out (the session cookie) between calls.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Ask the server for a new session and return its welcome text.
    async fn new_context(&self) -> Result<Welcome, GatewayError>;

    /// Submit one (already trimmed) user message.
    async fn send_message(&self, message: &str) -> Result<ChatReply, GatewayError>;
}

/// Handle for receiving parsed chunks of a streamed reply.
///
/// Wraps an `mpsc::Receiver` fed by the adapter's body reader. Dropping the
/// handle stops the reader at its next send.
#[derive(Debug)]
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<Result<StreamChunk, GatewayError>>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<Result<StreamChunk, GatewayError>>) -> Self {
        Self { receiver }
    }

    /// Build an already-filled handle, e.g. for fakes and tests.
    pub fn from_chunks(chunks: Vec<Result<StreamChunk, GatewayError>>) -> Self {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            // Capacity covers every chunk, so this cannot fail
            let _ = tx.try_send(chunk);
        }
        Self::new(rx)
    }

    /// Next chunk, or `None` once the body has ended.
    pub async fn next(&mut self) -> Option<Result<StreamChunk, GatewayError>> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_chunks_yields_in_order() {
        let mut handle = StreamHandle::from_chunks(vec![
            Ok(StreamChunk::Delta("Hel".to_string())),
            Err(GatewayError::Server("rate limited".to_string())),
        ]);
        assert_eq!(
            handle.next().await,
            Some(Ok(StreamChunk::Delta("Hel".to_string())))
        );
        assert_eq!(
            handle.next().await,
            Some(Err(GatewayError::Server("rate limited".to_string())))
        );
    }

    #[tokio::test]
    async fn next_returns_none_after_last_chunk() {
        let mut handle = StreamHandle::from_chunks(vec![Ok(StreamChunk::Done)]);
        assert_eq!(handle.next().await, Some(Ok(StreamChunk::Done)));
        assert_eq!(handle.next().await, None);
    }

    #[test]
    fn frame_error_converts_into_gateway_error() {
        let err: GatewayError = FrameError::InvalidJson("eof".to_string()).into();
        assert!(matches!(err, GatewayError::MalformedFrame(_)));
    }
}
