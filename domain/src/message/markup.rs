//! Trusted markup fragments and HTML escaping
//!
//! Plain text only becomes part of a markup document through
//! [`escape_html`] (or [`Markup::push_link`]), so text from the user or the
//! bot can never introduce tags.

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// An HTML fragment that is trusted to be rendered as markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trusted fragment.
    pub fn push_trusted(&mut self, html: &str) {
        self.0.push_str(html);
    }

    /// Append an anchor opening in a new window.
    pub fn push_link(&mut self, href: &str, text: &str) {
        self.0.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(href),
            escape_html(text)
        ));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_script_tags() {
        let escaped = escape_html("<script>alert('x')</script>");
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert!(!escaped.contains('<'));
    }

    #[test]
    fn escape_ampersand_first() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
    }

    #[test]
    fn push_link_escapes_text() {
        let mut markup = Markup::new();
        markup.push_link("https://x/tc", "<img src=x onerror=alert(1)>");
        assert!(!markup.as_str().contains("<img"));
    }

    #[test]
    fn push_link_escapes_href_quotes() {
        let mut markup = Markup::new();
        markup.push_link("https://x/\"tc", "terms");
        assert_eq!(
            markup.as_str(),
            "<a href=\"https://x/&quot;tc\" target=\"_blank\">terms</a>"
        );
    }
}
