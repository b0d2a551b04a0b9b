//! Streamed reply chunks.
//!
//! A streamed `/chat` reply is a sequence of frames, each carrying one JSON
//! object with exactly one of three fields:
//!
//! | payload | chunk |
//! |---------|-------|
//! | `{"delta": "..."}` | [`StreamChunk::Delta`] |
//! | `{"done": true}` | [`StreamChunk::Done`] |
//! | `{"error": "..."}` | [`StreamChunk::Error`] |
//!
//! Anything else is a [`FrameError`].

use serde_json::Value;
use thiserror::Error;

/// Why a frame payload could not be turned into a [`StreamChunk`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Unexpected frame shape: {0}")]
    UnexpectedShape(String),
}

/// One parsed unit of a streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// Text fragment of the bot message being built.
    Delta(String),
    /// The reply is complete.
    Done,
    /// The server failed while producing the reply.
    Error(String),
}

impl StreamChunk {
    /// Parse the JSON payload of one frame.
    pub fn parse(payload: &str) -> Result<Self, FrameError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| FrameError::InvalidJson(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(FrameError::UnexpectedShape(payload.to_string()));
        };

        let delta = map.get("delta");
        let done = map.get("done");
        let error = map.get("error");

        match (delta, done, error) {
            (Some(Value::String(text)), None, None) => Ok(StreamChunk::Delta(text.clone())),
            (None, Some(Value::Bool(true)), None) => Ok(StreamChunk::Done),
            (None, None, Some(Value::String(message))) => Ok(StreamChunk::Error(message.clone())),
            _ => Err(FrameError::UnexpectedShape(payload.to_string())),
        }
    }

    /// Returns true if no further chunks should be read after this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamChunk::Done | StreamChunk::Error(_))
    }
}
