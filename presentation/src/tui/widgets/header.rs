//! Header widget: shows server and client phase

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use therabot_domain::ClientPhase;

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

fn phase_color(phase: ClientPhase) -> Color {
    match phase {
        ClientPhase::Idle => Color::Green,
        ClientPhase::AwaitingSession | ClientPhase::AwaitingReply => Color::Yellow,
        ClientPhase::Streaming => Color::Cyan,
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let phase = self.state.phase;
        let line = Line::from(vec![
            Span::styled("◉ ", Style::default().fg(phase_color(phase))),
            Span::styled(
                self.state.server_label.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(phase.label(), Style::default().fg(phase_color(phase))),
            Span::raw(" | "),
            Span::styled(
                format!("{} messages", self.state.messages.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" therabot-chat ")
            .style(Style::default().fg(Color::White));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
