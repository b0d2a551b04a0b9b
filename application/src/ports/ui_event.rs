//! UI event types emitted by the ChatClient for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. Views (the TUI and the plain REPL) never read the
//! transcript directly; they mirror it from these events.

use therabot_domain::{ClientPhase, Message};

/// Events emitted by the ChatClient for the presentation layer to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // === Transcript ===
    /// A message was appended at `index`
    MessageAppended { index: usize, message: Message },
    /// Streamed text was appended to the bot message at `index`
    MessageUpdated { index: usize, delta: String },
    /// The bot message at `index` was replaced (a stream failed part-way)
    MessageReplaced { index: usize, message: Message },
    /// The transcript was discarded (reset)
    TranscriptCleared,

    // === Input ===
    /// The draft input should be emptied
    InputCleared,
    /// Focus should return to the input field
    InputFocused,

    // === View ===
    /// The transcript view should be scrolled to its end
    ScrollToBottom(ScrollTrigger),
    /// The client moved to another phase
    PhaseChanged(ClientPhase),
    /// Out-of-band notice that is not part of the transcript
    Notice(String),
}

/// How urgently a scroll request should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTrigger {
    /// A whole message was appended; scroll now
    Immediate,
    /// Bulk content changed (streamed delta); coalesce with the debounce window
    Coalesced,
}

impl UiEvent {
    /// Whether this event changes the transcript.
    pub fn mutates_transcript(&self) -> bool {
        matches!(
            self,
            UiEvent::MessageAppended { .. }
                | UiEvent::MessageUpdated { .. }
                | UiEvent::MessageReplaced { .. }
                | UiEvent::TranscriptCleared
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_events_are_mutations() {
        assert!(
            UiEvent::MessageAppended {
                index: 0,
                message: Message::user("hi"),
            }
            .mutates_transcript()
        );
        assert!(
            UiEvent::MessageUpdated {
                index: 0,
                delta: "x".into(),
            }
            .mutates_transcript()
        );
        assert!(
            UiEvent::MessageReplaced {
                index: 0,
                message: Message::error("failed"),
            }
            .mutates_transcript()
        );
        assert!(UiEvent::TranscriptCleared.mutates_transcript());
        assert!(!UiEvent::ScrollToBottom(ScrollTrigger::Immediate).mutates_transcript());
        assert!(!UiEvent::Notice("printed".into()).mutates_transcript());
    }
}
