//! Input widget: single-line draft with a block cursor
//!
//! Long drafts scroll horizontally so the cursor stays visible. While a
//! reply is pending the box is dimmed and shows no cursor.

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.state.can_submit() && self.state.input_focused;
        let color = if active { Color::Green } else { Color::DarkGray };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(if active { " Message " } else { " Message (waiting) " })
            .style(Style::default().fg(color));

        let text = &self.state.input;
        let cursor_pos = self.state.cursor_pos.min(text.len());
        let mut spans = vec![Span::styled(
            PROMPT,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];

        if active {
            let cursor_style = Style::default().fg(Color::Black).bg(color);
            let before = &text[..cursor_pos];
            let after = &text[cursor_pos..];
            spans.push(Span::raw(before.to_string()));
            match after.chars().next() {
                Some(ch) => {
                    let ch_len = ch.len_utf8();
                    spans.push(Span::styled(after[..ch_len].to_string(), cursor_style));
                    spans.push(Span::raw(after[ch_len..].to_string()));
                }
                // Cursor at end of line: show block cursor on space
                None => spans.push(Span::styled(" ", cursor_style)),
            }
        } else {
            spans.push(Span::styled(text.clone(), Style::default().fg(color)));
        }

        // Keep the cursor column inside the box
        let inner_width = area.width.saturating_sub(2) as usize;
        let cursor_col = PROMPT.len() + text[..cursor_pos].chars().count();
        let h_scroll = (cursor_col + 1).saturating_sub(inner_width);

        Paragraph::new(Line::from(spans))
            .block(block)
            .scroll((0, h_scroll.min(u16::MAX as usize) as u16))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use therabot_domain::ClientPhase;

    fn rendered_line(state: &TuiState, width: u16) -> String {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new(state).render(area, &mut buf);
        (0..width).map(|x| buf[(x, 1)].symbol()).collect()
    }

    fn ready_state() -> TuiState {
        let mut state = TuiState::new();
        state.phase = ClientPhase::Idle;
        state.input_focused = true;
        state
    }

    #[test]
    fn test_draft_is_shown_after_prompt() {
        let mut state = ready_state();
        state.input = "hello".into();
        state.cursor_pos = 5;
        assert!(rendered_line(&state, 30).contains("> hello"));
    }

    #[test]
    fn test_long_draft_scrolls_to_cursor() {
        let mut state = ready_state();
        state.input = "abcdefghijklmnopqrstuvwxyz".into();
        state.cursor_pos = state.input.len();
        let line = rendered_line(&state, 12);
        assert!(line.contains("xyz"));
        assert!(!line.contains("abc"));
    }

    #[test]
    fn test_waiting_title() {
        let mut state = ready_state();
        state.phase = ClientPhase::AwaitingReply;
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new(&state).render(area, &mut buf);
        let top: String = (0..30).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("waiting"));
    }
}
