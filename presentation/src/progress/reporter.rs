//! Waiting indicator shown until a reply starts arriving

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use therabot_domain::ClientPhase;

/// Spinner shown while the client waits on the network.
///
/// Disabled reporters never draw, which keeps piped output clean.
pub struct ReplyProgress {
    enabled: bool,
    spinner: Option<ProgressBar>,
}

impl ReplyProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            spinner: None,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Spinner text for a phase, or `None` when nothing is awaited.
    pub fn waiting_message(phase: ClientPhase) -> Option<&'static str> {
        match phase {
            ClientPhase::AwaitingSession => Some("Starting a new session..."),
            ClientPhase::AwaitingReply => Some("Waiting for reply..."),
            ClientPhase::Idle | ClientPhase::Streaming => None,
        }
    }

    /// Follow a phase change: spin while waiting, stop otherwise.
    pub fn on_phase(&mut self, phase: ClientPhase) {
        match Self::waiting_message(phase) {
            Some(message) => self.start(message),
            None => self.finish(),
        }
    }

    pub fn start(&mut self, message: &str) {
        self.finish();
        if !self.enabled {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message.dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    /// Remove the spinner line, if one is showing.
    pub fn finish(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for ReplyProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_phases_have_messages() {
        assert!(ReplyProgress::waiting_message(ClientPhase::AwaitingSession).is_some());
        assert!(ReplyProgress::waiting_message(ClientPhase::AwaitingReply).is_some());
        assert!(ReplyProgress::waiting_message(ClientPhase::Streaming).is_none());
        assert!(ReplyProgress::waiting_message(ClientPhase::Idle).is_none());
    }

    #[test]
    fn test_disabled_reporter_never_spins() {
        let mut progress = ReplyProgress::new(false);
        progress.on_phase(ClientPhase::AwaitingReply);
        assert!(!progress.is_active());
    }

    #[test]
    fn test_spinner_stops_when_reply_streams() {
        let mut progress = ReplyProgress::new(true);
        progress.on_phase(ClientPhase::AwaitingReply);
        assert!(progress.is_active());
        progress.on_phase(ClientPhase::Streaming);
        assert!(!progress.is_active());
    }
}
