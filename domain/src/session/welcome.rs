//! Welcome text returned by session creation

use crate::message::markup::Markup;
use serde::{Deserialize, Serialize};

/// Substring of the first welcome line that links to the disclaimer.
pub const DISCLAIMER_PHRASE: &str = "terms and conditions";

/// The `message` field of a session-creation response: one string or an
/// ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WelcomeText {
    Single(String),
    Lines(Vec<String>),
}

impl WelcomeText {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            WelcomeText::Single(s) => vec![s.as_str()],
            WelcomeText::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// Parsed session-creation response (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    pub message: WelcomeText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer_url: Option<String>,
}

impl Welcome {
    pub fn new(message: WelcomeText) -> Self {
        Self {
            message,
            disclaimer_url: None,
        }
    }

    pub fn with_disclaimer_url(mut self, url: impl Into<String>) -> Self {
        self.disclaimer_url = Some(url.into());
        self
    }

    /// Index of the line that carries the disclaimer link, if any.
    ///
    /// This is the first line mentioning [`DISCLAIMER_PHRASE`], and only when
    /// a disclaimer URL was supplied.
    pub fn disclaimer_line(&self) -> Option<usize> {
        self.disclaimer_url.as_ref()?;
        self.message
            .lines()
            .iter()
            .position(|line| line.contains(DISCLAIMER_PHRASE))
    }

    /// Render the welcome text as a markup fragment.
    ///
    /// Lines are server-supplied and trusted; they are joined with `<br>`.
    /// The first occurrence of [`DISCLAIMER_PHRASE`] on the
    /// [disclaimer line](Self::disclaimer_line) becomes a link to the
    /// disclaimer URL.
    pub fn to_markup(&self) -> Markup {
        let link_line = self.disclaimer_line();
        let mut markup = Markup::new();
        for (i, line) in self.message.lines().into_iter().enumerate() {
            if i > 0 {
                markup.push_trusted("<br>");
            }
            match (&self.disclaimer_url, link_line) {
                (Some(url), Some(n)) if n == i => push_with_disclaimer(&mut markup, line, url),
                _ => markup.push_trusted(line),
            }
        }
        markup
    }
}

fn push_with_disclaimer(markup: &mut Markup, line: &str, url: &str) {
    match line.find(DISCLAIMER_PHRASE) {
        Some(start) => {
            let end = start + DISCLAIMER_PHRASE.len();
            markup.push_trusted(&line[..start]);
            markup.push_link(url, DISCLAIMER_PHRASE);
            markup.push_trusted(&line[end..]);
        }
        None => markup.push_trusted(line),
    }
}
