//! Status bar widget: key hints or flash messages

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let (indicator, indicator_color) = if self.state.can_submit() {
            ("READY", Color::Green)
        } else {
            ("WAIT", Color::Yellow)
        };
        let indicator_style = Style::default()
            .fg(Color::Black)
            .bg(indicator_color)
            .add_modifier(Modifier::BOLD);
        let indicator_span = Span::styled(format!(" {} ", indicator), indicator_style);
        let indicator_width = indicator.len() as u16 + 2;
        buf.set_line(area.x, area.y, &Line::from(vec![indicator_span]), indicator_width);

        let right_text = match &self.state.flash_message {
            Some((flash, _)) => flash.clone(),
            None => "Enter:send  PgUp/PgDn:scroll  Ctrl+P:print  F1:help  Esc:quit".to_string(),
        };
        let right_width = right_text.chars().count() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        let right_x = right_x.max(area.x + indicator_width + 1);
        let right_span = Span::styled(right_text, bg_style);
        buf.set_line(
            right_x,
            area.y,
            &Line::from(vec![right_span]),
            area.right().saturating_sub(right_x),
        );
    }
}
