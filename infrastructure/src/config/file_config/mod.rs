//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! String-typed fields are parsed into domain types by `parse_*` helpers
//! that report problems as [`ConfigIssue`]s instead of failing the load.

mod logging;
mod output;
mod print;
mod server;
mod tui;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use print::FilePrintConfig;
pub use server::{DEFAULT_BASE_URL, FileServerConfig};
pub use tui::{DEFAULT_SCROLL_DEBOUNCE_MS, FileTuiConfig};

use serde::{Deserialize, Serialize};
use therabot_domain::ConfigIssue;
use thiserror::Error;

/// Raised when the configuration contains error-level issues.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{} configuration error(s):\n{}", .0.len(), list_messages(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn list_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat server settings
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// TUI settings
    pub tui: FileTuiConfig,
    /// Print view settings
    pub print: FilePrintConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The server base URL
    /// 2. Enum parse failures (response_mode)
    /// 3. Numeric ranges (scroll debounce)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Base URL
        issues.extend(self.server.validate_base_url());

        // 2. Enum parse validation
        issues.extend(self.server.parse_response_mode().1);

        // 3. Range validation
        issues.extend(self.tui.validate());

        issues
    }

    /// Fail on error-level issues; return the remaining warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }
}
