//! Print configuration from TOML (`[print]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw print configuration from TOML
///
/// # Example
///
/// ```toml
/// [print]
/// directory = "~/Documents/transcripts"
/// open_viewer = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePrintConfig {
    /// Where print views are written (default: system temp dir)
    pub directory: Option<String>,
    /// Open the print view with the platform opener (default: true)
    pub open_viewer: bool,
}

impl Default for FilePrintConfig {
    fn default() -> Self {
        Self {
            directory: None,
            open_viewer: true,
        }
    }
}

impl FilePrintConfig {
    /// `directory` with a leading `~` expanded.
    pub fn resolved_directory(&self) -> Option<PathBuf> {
        self.directory.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilePrintConfig::default();
        assert!(config.open_viewer);
        assert_eq!(config.resolved_directory(), None);
    }

    #[test]
    fn test_plain_directory_is_kept() {
        let config = FilePrintConfig {
            directory: Some("/var/tmp/prints".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_directory(),
            Some(PathBuf::from("/var/tmp/prints"))
        );
    }

    #[test]
    fn test_home_is_expanded() {
        let expanded = expand_home("~/prints");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("prints"));
        }
    }
}
