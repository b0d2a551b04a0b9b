//! Help overlay widget

use crate::command::HELP_LINES;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const KEY_LINES: &[(&str, &str)] = &[
    ("Enter", "Send message"),
    ("Backspace/Del", "Delete character"),
    ("Ctrl+U", "Clear the draft"),
    ("Up/Down", "Scroll one line"),
    ("PgUp/PgDn", "Scroll one page"),
    ("Ctrl+End", "Jump to the newest message"),
    ("Ctrl+P", "Print the conversation"),
    ("F1", "Toggle this help"),
    ("Esc/Ctrl+C", "Exit"),
];

/// Widget for rendering help overlay
pub struct HelpWidget;

impl HelpWidget {
    pub fn new() -> Self {
        Self
    }

    fn section(title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn entry(key: &'static str, description: &'static str, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), Style::default().fg(color)),
            Span::raw(description),
        ])
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let mut lines = vec![Self::section("Keyboard Shortcuts"), Line::from("")];
        lines.extend(
            KEY_LINES
                .iter()
                .map(|(key, description)| Self::entry(key, description, Color::Yellow)),
        );
        lines.push(Line::from(""));
        lines.push(Self::section("Commands"));
        lines.push(Line::from(""));
        lines.extend(
            HELP_LINES
                .iter()
                .map(|(usage, description)| Self::entry(usage, description, Color::Green)),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press F1 or Esc to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = Self::build_help_text();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        paragraph.render(area, buf);
    }
}

impl Default for HelpWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_keys_and_commands() {
        let area = Rect::new(0, 0, 70, 30);
        let mut buf = Buffer::empty(area);
        HelpWidget::new().render(area, &mut buf);

        let content = buf.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(content.contains("Ctrl+P"));
        assert!(content.contains("/print [PATH]"));
        assert!(content.contains("/reset"));
    }
}
