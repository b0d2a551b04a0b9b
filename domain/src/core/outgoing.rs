//! Outgoing message value object

use serde::{Deserialize, Serialize};

/// User text that is about to be sent to the chat endpoint (Value Object)
///
/// The text is trimmed on construction and is never empty, so holding an
/// `OutgoingMessage` means "a request will be issued".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    text: String,
}

impl OutgoingMessage {
    /// Trim the raw input, returning `None` if nothing is left.
    pub fn try_new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }

    /// Get the trimmed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for OutgoingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        let msg = OutgoingMessage::try_new("  hello there \n").unwrap();
        assert_eq!(msg.text(), "hello there");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(OutgoingMessage::try_new("").is_none());
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert!(OutgoingMessage::try_new("   \t\n ").is_none());
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        let msg = OutgoingMessage::try_new(" a  b ").unwrap();
        assert_eq!(msg.into_text(), "a  b");
    }
}
