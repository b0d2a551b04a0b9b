//! TUI Presenter - Converts Application Events to TUI State
//!
//! ```text
//! ChatClient (UiEvent)
//!         ↓
//!   TuiPresenter (this module, owns the ScrollCoalescer)
//!         ↓
//!   TuiState (view state)
//!         ↓
//!   Widgets
//! ```

use super::scroll::ScrollCoalescer;
use super::state::TuiState;
use std::time::{Duration, Instant};
use therabot_application::{ScrollTrigger, UiEvent};
use tracing::warn;

pub struct TuiPresenter {
    scroll: ScrollCoalescer,
}

impl Default for TuiPresenter {
    fn default() -> Self {
        Self {
            scroll: ScrollCoalescer::default(),
        }
    }
}

impl TuiPresenter {
    pub fn new(scroll_debounce: Duration) -> Self {
        Self {
            scroll: ScrollCoalescer::new(scroll_debounce),
        }
    }

    /// Apply one UiEvent to the view state.
    pub fn apply(&mut self, state: &mut TuiState, event: UiEvent, now: Instant) {
        match event {
            UiEvent::MessageAppended { index, message } => {
                if index == state.messages.len() {
                    state.messages.push(message);
                } else if let Some(slot) = state.messages.get_mut(index) {
                    *slot = message;
                } else {
                    warn!(
                        index,
                        len = state.messages.len(),
                        "Message index skips ahead of the view"
                    );
                    state.messages.push(message);
                }
            }
            UiEvent::MessageUpdated { index, delta } => match state.messages.get_mut(index) {
                Some(message) => message.content.push_str(&delta),
                None => warn!(index, "Delta for a message the view does not have"),
            },
            UiEvent::MessageReplaced { index, message } => match state.messages.get_mut(index) {
                Some(slot) => *slot = message,
                None => {
                    warn!(index, "Replacement for a message the view does not have");
                    state.messages.push(message);
                }
            },
            UiEvent::TranscriptCleared => {
                state.messages.clear();
                state.scroll_to_bottom();
                self.scroll.cancel();
            }
            UiEvent::InputCleared => state.clear_input(),
            UiEvent::InputFocused => state.input_focused = true,
            UiEvent::ScrollToBottom(ScrollTrigger::Immediate) => {
                state.scroll_to_bottom();
                self.scroll.cancel();
            }
            UiEvent::ScrollToBottom(ScrollTrigger::Coalesced) => self.scroll.trigger(now),
            UiEvent::PhaseChanged(phase) => state.phase = phase,
            UiEvent::Notice(text) => state.set_flash(text),
        }
    }

    /// The terminal was resized; settle on the bottom once resizing stops.
    pub fn on_resize(&mut self, now: Instant) {
        self.scroll.trigger(now);
    }

    /// When a coalesced scroll is due, if any.
    pub fn scroll_deadline(&self) -> Option<Instant> {
        self.scroll.deadline()
    }

    /// Apply a coalesced scroll whose deadline has passed.
    ///
    /// Returns whether the view was scrolled.
    pub fn flush_scroll(&mut self, state: &mut TuiState, now: Instant) -> bool {
        if self.scroll.poll(now) {
            state.scroll_to_bottom();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use therabot_domain::{ClientPhase, Message};

    const WINDOW: Duration = Duration::from_millis(100);

    fn appended(index: usize, message: Message) -> UiEvent {
        UiEvent::MessageAppended { index, message }
    }

    #[test]
    fn test_messages_are_mirrored() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        let now = Instant::now();

        presenter.apply(&mut state, appended(0, Message::user("hi")), now);
        presenter.apply(&mut state, appended(1, Message::bot("Hel")), now);
        presenter.apply(
            &mut state,
            UiEvent::MessageUpdated {
                index: 1,
                delta: "lo".into(),
            },
            now,
        );

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].content, "Hello");
    }

    #[test]
    fn test_failed_stream_replaces_partial_reply() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        let now = Instant::now();

        presenter.apply(&mut state, appended(0, Message::user("hi")), now);
        presenter.apply(&mut state, appended(1, Message::bot("Hel")), now);
        presenter.apply(
            &mut state,
            UiEvent::MessageReplaced {
                index: 1,
                message: Message::error("Error: rate limited"),
            },
            now,
        );

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1], Message::error("Error: rate limited"));
    }

    #[test]
    fn test_clear_empties_view() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        let now = Instant::now();
        presenter.apply(&mut state, appended(0, Message::user("hi")), now);
        state.scroll_up(4);

        presenter.apply(&mut state, UiEvent::TranscriptCleared, now);
        assert!(state.messages.is_empty());
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_input_events() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        state.input = "draft".into();
        state.cursor_pos = 5;

        presenter.apply(&mut state, UiEvent::InputCleared, Instant::now());
        presenter.apply(&mut state, UiEvent::InputFocused, Instant::now());
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_pos, 0);
        assert!(state.input_focused);
    }

    #[test]
    fn test_immediate_scroll() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        state.scroll_up(5);

        presenter.apply(
            &mut state,
            UiEvent::ScrollToBottom(ScrollTrigger::Immediate),
            Instant::now(),
        );
        assert!(state.is_at_bottom());
        assert!(presenter.scroll_deadline().is_none());
    }

    #[test]
    fn test_coalesced_scrolls_apply_once_after_window() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        let start = Instant::now();
        state.scroll_up(5);

        for i in 0..5 {
            presenter.apply(
                &mut state,
                UiEvent::ScrollToBottom(ScrollTrigger::Coalesced),
                start + Duration::from_millis(10 * i),
            );
        }
        assert!(!state.is_at_bottom());
        assert!(!presenter.flush_scroll(&mut state, start + Duration::from_millis(60)));

        let due = presenter.scroll_deadline().unwrap();
        assert_eq!(due, start + Duration::from_millis(40) + WINDOW);
        assert!(presenter.flush_scroll(&mut state, due));
        assert!(state.is_at_bottom());
        assert!(!presenter.flush_scroll(&mut state, due + WINDOW));
    }

    #[test]
    fn test_phase_and_notice() {
        let mut presenter = TuiPresenter::new(WINDOW);
        let mut state = TuiState::new();
        presenter.apply(
            &mut state,
            UiEvent::PhaseChanged(ClientPhase::Streaming),
            Instant::now(),
        );
        presenter.apply(
            &mut state,
            UiEvent::Notice("Print view written to x.html".into()),
            Instant::now(),
        );
        assert_eq!(state.phase, ClientPhase::Streaming);
        assert_eq!(
            state.flash_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Print view written to x.html")
        );
    }
}
