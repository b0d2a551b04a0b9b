//! Client phase state machine
//!
//! ```text
//! Idle ──initialize──> AwaitingSession ──> Idle
//! Idle ──send────────> AwaitingReply ──> (Streaming)* ──> Idle
//! ```

use crate::core::error::DomainError;

/// What the chat client is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientPhase {
    #[default]
    Idle,
    /// Session-creation request issued
    AwaitingSession,
    /// Message submitted, no reply bytes yet
    AwaitingReply,
    /// Reading a streamed reply
    Streaming,
}

impl ClientPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, ClientPhase::Idle)
    }

    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            ClientPhase::Idle => "Ready",
            ClientPhase::AwaitingSession => "Starting session",
            ClientPhase::AwaitingReply => "Waiting for reply",
            ClientPhase::Streaming => "Receiving",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: ClientPhase) -> bool {
        use ClientPhase::*;
        matches!(
            (self, next),
            (Idle, AwaitingSession)
                | (AwaitingSession, Idle)
                | (Idle, AwaitingReply)
                | (AwaitingReply, Streaming)
                | (AwaitingReply, Idle)
                | (Streaming, Idle)
        )
    }

    /// Move to `next`, rejecting transitions the state machine does not allow.
    pub fn transition(self, next: ClientPhase) -> Result<ClientPhase, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.label(),
                to: next.label(),
            })
        }
    }
}

impl std::fmt::Display for ClientPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(ClientPhase::default().is_idle());
    }

    #[test]
    fn test_init_cycle() {
        let phase = ClientPhase::Idle
            .transition(ClientPhase::AwaitingSession)
            .unwrap()
            .transition(ClientPhase::Idle)
            .unwrap();
        assert!(phase.is_idle());
    }

    #[test]
    fn test_streaming_send_cycle() {
        let phase = ClientPhase::Idle
            .transition(ClientPhase::AwaitingReply)
            .unwrap()
            .transition(ClientPhase::Streaming)
            .unwrap()
            .transition(ClientPhase::Idle)
            .unwrap();
        assert!(phase.is_idle());
    }

    #[test]
    fn test_no_overlapping_send() {
        assert!(
            ClientPhase::Streaming
                .transition(ClientPhase::AwaitingReply)
                .is_err()
        );
        assert!(!ClientPhase::AwaitingSession.can_transition_to(ClientPhase::AwaitingReply));
    }
}
