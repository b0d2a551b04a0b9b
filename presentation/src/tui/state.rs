//! TUI application state
//!
//! Single source of truth for everything the TUI renders.
//! Updated by TuiPresenter (UiEvent → state) and by key handling in TuiApp.

use std::time::{Duration, Instant};
use therabot_domain::{ClientPhase, Message};

/// Central TUI state: owned by the TuiApp select! loop
pub struct TuiState {
    // -- Transcript mirror --
    pub messages: Vec<Message>,

    // -- Draft input --
    pub input: String,
    pub cursor_pos: usize,
    pub input_focused: bool,

    // -- Client --
    pub phase: ClientPhase,
    pub server_label: String,

    // -- Scroll (0 = pinned to the bottom) --
    pub scroll_offset: usize,

    // -- Overlay --
    pub show_help: bool,
    pub flash_message: Option<(String, Instant)>,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            cursor_pos: 0,
            input_focused: false,
            // The session request goes out before the first event arrives
            phase: ClientPhase::AwaitingSession,
            server_label: String::new(),
            scroll_offset: 0,
            show_help: false,
            flash_message: None,
            should_quit: false,
        }
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_label(mut self, label: impl Into<String>) -> Self {
        self.server_label = label.into();
        self
    }

    /// Whether a new message may be submitted.
    pub fn can_submit(&self) -> bool {
        self.phase.is_idle()
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let prev_char_len = self.input[..self.cursor_pos]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor_pos -= prev_char_len;
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            let prev_char_len = self.input[..self.cursor_pos]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor_pos -= prev_char_len;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            let next_char_len = self.input[self.cursor_pos..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor_pos += next_char_len;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Take the draft, leaving the input empty.
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    // -- Flash --

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }

    pub fn expire_flash(&mut self, ttl: Duration) {
        if let Some((_, at)) = &self.flash_message
            && at.elapsed() >= ttl
        {
            self.flash_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_editing() {
        let mut state = TuiState::new();
        state.insert_char('h');
        state.insert_char('i');
        assert_eq!(state.input, "hi");
        assert_eq!(state.cursor_pos, 2);

        state.delete_char();
        assert_eq!(state.input, "h");
        assert_eq!(state.cursor_pos, 1);
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut state = TuiState::new();
        for c in "aé😀".chars() {
            state.insert_char(c);
        }
        state.cursor_left();
        assert_eq!(state.cursor_pos, 3);
        state.cursor_left();
        assert_eq!(state.cursor_pos, 1);
        state.delete_forward();
        assert_eq!(state.input, "a😀");
        state.cursor_end();
        state.delete_char();
        assert_eq!(state.input, "a");
        state.cursor_right();
        assert_eq!(state.cursor_pos, 1);
    }

    #[test]
    fn test_take_input_clears() {
        let mut state = TuiState::new();
        state.input = "hello".into();
        state.cursor_pos = 5;

        let taken = state.take_input();
        assert_eq!(taken, "hello");
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn test_scroll_behavior() {
        let mut state = TuiState::new();
        assert!(state.is_at_bottom());

        state.scroll_up(3);
        assert!(!state.is_at_bottom());
        assert_eq!(state.scroll_offset, 3);

        state.scroll_down(5);
        assert!(state.is_at_bottom());

        state.scroll_up(2);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_submission_only_when_idle() {
        let mut state = TuiState::new();
        assert!(!state.can_submit());
        state.phase = ClientPhase::Idle;
        assert!(state.can_submit());
        state.phase = ClientPhase::Streaming;
        assert!(!state.can_submit());
    }

    #[test]
    fn test_flash_expiry() {
        let mut state = TuiState::new();
        state.set_flash("hello");
        state.expire_flash(Duration::from_secs(60));
        assert!(state.flash_message.is_some());
        state.expire_flash(Duration::ZERO);
        assert!(state.flash_message.is_none());
    }
}
