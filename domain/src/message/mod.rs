//! Message domain.
//!
//! - [`entities::Message`]: a single rendered message and its [`entities::Role`]
//! - [`transcript::Transcript`]: the ordered log of messages
//! - [`markup::Markup`]: trusted HTML fragments and text escaping

pub mod entities;
pub mod markup;
pub mod transcript;
