//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("No message at transcript index {0}")]
    UnknownMessage(usize),

    #[error("Message at index {0} is not a bot message")]
    NotABotMessage(usize),

    #[error("Invalid response mode: {0}")]
    InvalidResponseMode(String),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_message_display() {
        let error = DomainError::UnknownMessage(3);
        assert_eq!(error.to_string(), "No message at transcript index 3");
    }

    #[test]
    fn test_invalid_response_mode_display() {
        let error = DomainError::InvalidResponseMode("fast".to_string());
        assert_eq!(error.to_string(), "Invalid response mode: fast");
    }
}
