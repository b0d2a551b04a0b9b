//! Conversation widget: message history with streaming indicator

use crate::markup::{self, Segment};
use crate::output::sanitize::strip_controls;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use therabot_domain::{ClientPhase, Message, Role};

/// Indent of message content under its label
const INDENT: &str = "  ";

pub fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Bot => Color::Green,
        Role::System => Color::Yellow,
        Role::Error => Color::Red,
    }
}

pub struct ConversationWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn format_messages(&self) -> Text<'static> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let last = self.state.messages.len().saturating_sub(1);

        for (i, msg) in self.state.messages.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("{}:", msg.role.label()),
                Style::default()
                    .fg(role_color(msg.role))
                    .add_modifier(Modifier::BOLD),
            )));

            let mut content = content_lines(msg);
            if i == last && msg.role == Role::Bot && self.state.phase == ClientPhase::Streaming {
                let cursor = Span::styled("▌", Style::default().fg(Color::Green));
                match content.last_mut() {
                    Some(line) => line.spans.push(cursor),
                    None => content.push(Line::from(vec![Span::raw(INDENT), cursor])),
                }
            }
            lines.extend(content);
            lines.push(Line::from(""));
        }

        if self.state.phase == ClientPhase::AwaitingReply {
            lines.push(Line::from(Span::styled(
                format!("{}...", INDENT),
                Style::default().fg(Color::DarkGray),
            )));
        }

        Text::from(lines)
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.format_messages()).wrap(Wrap { trim: false })
    }

    /// Largest useful scroll offset for this content in `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let visible_height = area.height.saturating_sub(2) as usize;
        let content_width = area.width.saturating_sub(2);
        self.paragraph()
            .line_count(content_width)
            .saturating_sub(visible_height)
    }
}

/// Content of one message as indented lines.
fn content_lines(msg: &Message) -> Vec<Line<'static>> {
    if msg.is_markup {
        return markup::to_lines(&msg.content)
            .into_iter()
            .map(|segments| {
                let mut spans = vec![Span::raw(INDENT)];
                for segment in segments {
                    match segment {
                        Segment::Text(text) => spans.push(Span::raw(text)),
                        Segment::Link { text, href } => {
                            spans.push(Span::styled(
                                text,
                                Style::default()
                                    .fg(Color::Blue)
                                    .add_modifier(Modifier::UNDERLINED),
                            ));
                            spans.push(Span::styled(
                                format!(" <{}>", href),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                    }
                }
                Line::from(spans)
            })
            .collect();
    }

    let style = match msg.role {
        Role::Error => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    if msg.content.is_empty() {
        return Vec::new();
    }
    strip_controls(&msg.content)
        .split('\n')
        .map(|line| Line::from(Span::styled(format!("{}{}", INDENT, line), style)))
        .collect()
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // line_count() wraps exactly the way rendering does
        let paragraph = self.paragraph();
        let total_lines = paragraph.line_count(content_width) as u16;

        // scroll_offset=0 means "show bottom"
        let scroll = if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            let offset = (self.state.scroll_offset.min(u16::MAX as usize) as u16).min(max_scroll);
            max_scroll - offset
        } else {
            0
        };

        let title = if self.state.is_at_bottom() {
            " Conversation ".to_string()
        } else {
            format!(" Conversation (+{}) ", self.state.scroll_offset)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}
