//! TUI configuration from TOML (`[tui]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use therabot_domain::{ConfigIssue, ConfigIssueCode, Severity};

/// Default debounce window for resize/stream scroll triggers
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 100;

/// Windows above this make scrolling feel stuck
const MAX_SCROLL_DEBOUNCE_MS: u64 = 2_000;

/// Raw TUI configuration from TOML
///
/// # Example
///
/// ```toml
/// [tui]
/// scroll_debounce_ms = 100
/// mouse = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTuiConfig {
    /// Coalescing window for scroll-to-bottom (default: 100)
    pub scroll_debounce_ms: u64,
    /// Capture the mouse for wheel scrolling (default: true)
    pub mouse: bool,
}

impl Default for FileTuiConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            mouse: true,
        }
    }
}

impl FileTuiConfig {
    /// Debounce window, clamped to a usable range.
    ///
    /// Out-of-range values are reported by [`validate`](Self::validate).
    pub fn scroll_debounce(&self) -> (Duration, Vec<ConfigIssue>) {
        let issues = self.validate();
        let ms = if issues.is_empty() {
            self.scroll_debounce_ms
        } else {
            DEFAULT_SCROLL_DEBOUNCE_MS
        };
        (Duration::from_millis(ms), issues)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if (1..=MAX_SCROLL_DEBOUNCE_MS).contains(&self.scroll_debounce_ms) {
            return Vec::new();
        }
        vec![ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: "tui.scroll_debounce_ms".to_string(),
                value: self.scroll_debounce_ms,
            },
            message: format!(
                "tui.scroll_debounce_ms: {} is outside 1..={}, using {}",
                self.scroll_debounce_ms, MAX_SCROLL_DEBOUNCE_MS, DEFAULT_SCROLL_DEBOUNCE_MS
            ),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_debounce_is_100ms() {
        let (window, issues) = FileTuiConfig::default().scroll_debounce();
        assert_eq!(window, Duration::from_millis(100));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_out_of_range_debounce_falls_back() {
        for value in [0, 60_000] {
            let config = FileTuiConfig {
                scroll_debounce_ms: value,
                ..Default::default()
            };
            let (window, issues) = config.scroll_debounce();
            assert_eq!(window, Duration::from_millis(DEFAULT_SCROLL_DEBOUNCE_MS));
            assert_eq!(issues.len(), 1);
            assert!(!issues[0].is_error());
        }
    }

    #[test]
    fn test_tui_deserialize() {
        let toml_str = r#"
[tui]
scroll_debounce_ms = 250
mouse = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tui.scroll_debounce_ms, 250);
        assert!(!config.tui.mouse);
    }
}
