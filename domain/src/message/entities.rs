//! Message domain entities

use serde::{Deserialize, Serialize};

/// Who a transcript message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text the user submitted
    User,
    /// Reply from the chat backend
    Bot,
    /// Session notices (welcome text)
    System,
    /// Locally rendered failure notice
    Error,
}

impl Role {
    /// Stable lowercase tag, used as CSS class and log field
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
            Role::System => "system",
            Role::Error => "error",
        }
    }

    /// Human-readable label shown next to a message
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
            Role::System => "System",
            Role::Error => "Error",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in the transcript (Entity)
///
/// `is_markup` marks `content` as a trusted HTML fragment. It is only ever
/// set for server-supplied welcome text; every other message is plain text
/// and must never be interpreted as markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub is_markup: bool,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, is_markup: bool) -> Self {
        Self {
            role,
            content: content.into(),
            is_markup,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, false)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, false)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Error, content, false)
    }

    /// System message whose content is trusted markup
    pub fn system_markup(content: impl Into<String>) -> Self {
        Self::new(Role::System, content, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }

    #[test]
    fn test_constructors_only_mark_system_as_markup() {
        assert!(!Message::user("<b>hi</b>").is_markup);
        assert!(!Message::bot("<b>hi</b>").is_markup);
        assert!(!Message::error("<b>hi</b>").is_markup);
        assert!(Message::system_markup("<b>hi</b>").is_markup);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Error.as_str(), "error");
    }
}
