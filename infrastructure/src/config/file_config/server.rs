//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use therabot_domain::{ConfigIssue, ConfigIssueCode, ResponseMode, Severity};

/// Default chat server
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// base_url = "https://chat.example.com"
/// response_mode = "stream"   # auto | whole | stream
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL; `/new-context` and `/chat` are resolved below it
    pub base_url: String,
    /// How `/chat` replies are read (default: "auto")
    pub response_mode: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            response_mode: ResponseMode::Auto.as_str().to_string(),
        }
    }
}

impl FileServerConfig {
    /// Parse `response_mode`, falling back to `auto` with a warning.
    pub fn parse_response_mode(&self) -> (ResponseMode, Vec<ConfigIssue>) {
        match self.response_mode.parse::<ResponseMode>() {
            Ok(mode) => (mode, Vec::new()),
            Err(_) => (
                ResponseMode::Auto,
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "server.response_mode".to_string(),
                        value: self.response_mode.clone(),
                        valid_values: vec![
                            "auto".to_string(),
                            "whole".to_string(),
                            "stream".to_string(),
                        ],
                    },
                    message: format!(
                        "server.response_mode: unknown value '{}', falling back to 'auto'",
                        self.response_mode
                    ),
                }],
            ),
        }
    }

    /// Check that `base_url` is an absolute http(s) URL.
    pub fn validate_base_url(&self) -> Vec<ConfigIssue> {
        let reason = match reqwest::Url::parse(self.base_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => return Vec::new(),
            Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
            Err(e) => e.to_string(),
        };
        vec![ConfigIssue {
            severity: Severity::Error,
            code: ConfigIssueCode::InvalidBaseUrl {
                value: self.base_url.clone(),
            },
            message: format!("server.base_url: '{}' is not usable ({})", self.base_url, reason),
        }]
    }
}
