//! Response mode value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Content type announcing a streamed reply
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// How a `/chat` reply body is read.
///
/// `Auto` negotiates per response from its `Content-Type`; the other two
/// force one shape regardless of what the server announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    #[default]
    Auto,
    /// One JSON object `{"response": "..."}`
    Whole,
    /// `data:` frames separated by blank lines
    Stream,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Auto => "auto",
            ResponseMode::Whole => "whole",
            ResponseMode::Stream => "stream",
        }
    }

    /// Decide the concrete mode for one response.
    ///
    /// Never returns `Auto`.
    pub fn resolve(&self, content_type: Option<&str>) -> ResponseMode {
        match self {
            ResponseMode::Whole => ResponseMode::Whole,
            ResponseMode::Stream => ResponseMode::Stream,
            ResponseMode::Auto => {
                let is_stream = content_type
                    .map(|ct| {
                        ct.split(';')
                            .next()
                            .unwrap_or("")
                            .trim()
                            .eq_ignore_ascii_case(EVENT_STREAM_CONTENT_TYPE)
                    })
                    .unwrap_or(false);
                if is_stream {
                    ResponseMode::Stream
                } else {
                    ResponseMode::Whole
                }
            }
        }
    }
}

impl FromStr for ResponseMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ResponseMode::Auto),
            "whole" | "json" => Ok(ResponseMode::Whole),
            "stream" | "streaming" | "sse" => Ok(ResponseMode::Stream),
            other => Err(DomainError::InvalidResponseMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        assert_eq!(ResponseMode::default(), ResponseMode::Auto);
    }

    #[test]
    fn test_auto_negotiates_event_stream() {
        let mode = ResponseMode::Auto.resolve(Some("text/event-stream; charset=utf-8"));
        assert_eq!(mode, ResponseMode::Stream);
    }

    #[test]
    fn test_auto_falls_back_to_whole() {
        assert_eq!(
            ResponseMode::Auto.resolve(Some("application/json")),
            ResponseMode::Whole
        );
        assert_eq!(ResponseMode::Auto.resolve(None), ResponseMode::Whole);
    }

    #[test]
    fn test_forced_modes_ignore_content_type() {
        assert_eq!(
            ResponseMode::Whole.resolve(Some("text/event-stream")),
            ResponseMode::Whole
        );
        assert_eq!(
            ResponseMode::Stream.resolve(Some("application/json")),
            ResponseMode::Stream
        );
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("SSE".parse::<ResponseMode>().unwrap(), ResponseMode::Stream);
        assert_eq!("json".parse::<ResponseMode>().unwrap(), ResponseMode::Whole);
        assert!("fast".parse::<ResponseMode>().is_err());
    }

    #[test]
    fn test_deserialize_lowercase() {
        let mode: ResponseMode = serde_json::from_str("\"stream\"").unwrap();
        assert_eq!(mode, ResponseMode::Stream);
    }
}
