//! Configuration file loading for therabot-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./therabot.toml` or `./.therabot.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/therabot-chat/config.toml`
//! 4. Fallback: `~/.config/therabot-chat/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FilePrintConfig,
    FileServerConfig, FileTuiConfig,
};
pub use loader::ConfigLoader;
