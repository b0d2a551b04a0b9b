//! HTTP adapter for the chat server.
//!
//! [`HttpChatGateway`] implements the
//! [`ChatGateway`](therabot_application::ChatGateway) port with a reqwest
//! client that keeps the server's session cookie. Streamed replies are read
//! by a background task that feeds a [`FrameDecoder`] and forwards parsed
//! chunks over a bounded channel.

pub mod error;
pub mod frame;
pub mod gateway;

pub use error::HttpError;
pub use frame::FrameDecoder;
pub use gateway::HttpChatGateway;
