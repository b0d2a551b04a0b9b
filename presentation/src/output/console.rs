//! Console output formatter for chat messages

use crate::command::HELP_LINES;
use crate::markup::{self, Segment};
use crate::output::sanitize::strip_controls;
use colored::{ColoredString, Colorize};
use therabot_domain::{Message, Role};

/// Formats transcript messages for line-based console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI styling for everything formatted afterwards.
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Colored `Label:` prefix for a role.
    pub fn label(role: Role) -> ColoredString {
        let label = format!("{}:", role.label());
        match role {
            Role::User => label.cyan().bold(),
            Role::Bot => label.green().bold(),
            Role::System => label.yellow().bold(),
            Role::Error => label.red().bold(),
        }
    }

    /// Format a complete message: label, then content with continuation
    /// lines indented under it.
    pub fn format_message(message: &Message) -> String {
        let content = Self::format_content(message);
        let body = Self::indent(&content, "  ");
        format!("{}\n{}", Self::label(message.role), body)
    }

    /// Content of a message as console text.
    ///
    /// Markup is flattened; plain text is printed as-is minus control
    /// characters (errors in red).
    pub fn format_content(message: &Message) -> String {
        if message.is_markup {
            return Self::format_markup(&message.content);
        }
        let content: &str = &strip_controls(&message.content);
        match message.role {
            Role::Error => content.red().to_string(),
            _ => content.to_string(),
        }
    }

    /// Flatten markup; links become underlined text followed by the URL.
    pub fn format_markup(html: &str) -> String {
        markup::to_lines(html)
            .iter()
            .map(|line| {
                line.iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => text.clone(),
                        Segment::Link { text, href } => {
                            format!("{} {}", text.underline(), format!("<{}>", href).dimmed())
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Out-of-band notice (print results, unknown commands, ...).
    pub fn format_notice(text: &str) -> String {
        let text: &str = &strip_controls(text);
        format!("{} {}", "*".blue().bold(), text.dimmed())
    }

    /// Startup banner.
    pub fn header(server: &str) -> String {
        let line = "─".repeat(47);
        format!(
            "{}\n  {}  {}\n{}\n{}",
            line.cyan(),
            "therabot-chat".bold(),
            server.dimmed(),
            line.cyan(),
            "Type /help for commands.".dimmed()
        )
    }

    /// Marker printed when the conversation is reset.
    pub fn reset_marker() -> String {
        format!("{}", "── new conversation ──".cyan())
    }

    /// Command list.
    pub fn help() -> String {
        let mut output = format!("{}\n", "Commands:".cyan().bold());
        for (usage, description) in HELP_LINES {
            output.push_str(&format!("  {:<18} {}\n", usage, description));
        }
        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.split('\n')
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_has_label_and_indented_lines() {
        let out = ConsoleFormatter::format_message(&Message::bot("line one\nline two"));
        assert!(out.contains("Bot:"));
        assert!(out.contains("  line one\n  line two"));
    }

    #[test]
    fn test_plain_text_is_not_interpreted() {
        let out = ConsoleFormatter::format_content(&Message::user("<b>hi</b>"));
        assert_eq!(out, "<b>hi</b>");
    }

    #[test]
    fn test_markup_link_shows_url() {
        let message = Message::system_markup(
            "Welcome.<br>Accept the <a href=\"https://x/tc\" target=\"_blank\">terms and conditions</a>",
        );
        let out = ConsoleFormatter::format_content(&message);
        assert!(out.starts_with("Welcome.\nAccept the "));
        assert!(out.contains("terms and conditions"));
        assert!(out.contains("https://x/tc"));
    }

    #[test]
    fn test_control_characters_are_not_printed() {
        let out = ConsoleFormatter::format_content(&Message::bot(
            "hi\x1b[2J\x1b]8;;http://evil\x07click",
        ));
        assert!(!out.contains('\x1b'));
        assert!(!out.contains('\x07'));
        assert!(out.contains("click"));
    }

    #[test]
    fn test_markup_text_drops_control_characters() {
        let message = Message::system_markup(
            "Hi\x1b[2J <a href=\"https://x/\x1btc\">terms\x07</a>",
        );
        let out = ConsoleFormatter::format_content(&message);
        assert!(!out.contains("\x1b[2J"));
        assert!(!out.contains("\x1btc"));
        assert!(!out.contains('\x07'));
    }

    #[test]
    fn test_indent_keeps_empty_lines() {
        assert_eq!(ConsoleFormatter::indent("a\n\nb", "> "), "> a\n> \n> b");
    }

    #[test]
    fn test_help_lists_commands() {
        let help = ConsoleFormatter::help();
        assert!(help.contains("/print [PATH]"));
        assert!(help.contains("/reset"));
        assert!(help.contains("/quit"));
    }
}
