//! Transcript entity: the ordered log of rendered messages

use super::entities::{Message, Role};
use crate::core::error::DomainError;

/// Append-only, chronologically ordered list of messages.
///
/// Indices are stable for the lifetime of the transcript: a message pushed at
/// index `n` stays at `n` until [`clear`](Self::clear). The only in-place
/// changes touch a bot message: streamed deltas grow it, and a failed stream
/// turns it into the error message that ends the exchange.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Append a streamed fragment to the bot message at `index`.
    pub fn append_delta(&mut self, index: usize, delta: &str) -> Result<&Message, DomainError> {
        let message = self
            .messages
            .get_mut(index)
            .ok_or(DomainError::UnknownMessage(index))?;
        if message.role != Role::Bot {
            return Err(DomainError::NotABotMessage(index));
        }
        message.content.push_str(delta);
        Ok(message)
    }

    /// Swap the bot message at `index` for `message`.
    pub fn replace_bot(&mut self, index: usize, message: Message) -> Result<(), DomainError> {
        let slot = self
            .messages
            .get_mut(index)
            .ok_or(DomainError::UnknownMessage(index))?;
        if slot.role != Role::Bot {
            return Err(DomainError::NotABotMessage(index));
        }
        *slot = message;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count messages with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    /// Drop every message (session reset).
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
