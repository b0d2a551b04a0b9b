//! Terminal rendering of trusted markup messages
//!
//! Only welcome text arrives as markup. It is parsed with `scraper` and
//! flattened into lines of [`Segment`]s, which each view then styles its
//! own way. Links keep their target so views can print the URL next to the
//! link text.

use crate::output::sanitize::strip_controls;
use scraper::{ElementRef, Html, Node};

/// Tags whose subtree is never shown
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Tags that start a new line before and after their content
const BLOCK_TAGS: &[&str] = &["p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "section"];

/// A run of text on one rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { text: String, href: String },
}

impl Segment {
    /// The visible text of the segment.
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Link { text, .. } => text,
        }
    }
}

/// One rendered line
pub type SegmentLine = Vec<Segment>;

/// Flatten a markup fragment into lines.
///
/// Whitespace collapses the way a browser would collapse it; `<br>` and
/// block elements break lines. Empty leading and trailing lines are dropped.
pub fn to_lines(html: &str) -> Vec<SegmentLine> {
    let fragment = Html::parse_fragment(html);
    let mut builder = LineBuilder::default();
    builder.walk(fragment.root_element());
    builder.finish()
}

/// Flatten a markup fragment to plain text, with links as `text (url)`.
pub fn to_plain_text(html: &str) -> String {
    to_lines(html)
        .iter()
        .map(|line| {
            line.iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text.clone(),
                    Segment::Link { text, href } => format!("{} ({})", text, href),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<SegmentLine>,
    current: SegmentLine,
    /// Last pushed character was collapsible whitespace (or the line is new)
    at_space: bool,
}

impl LineBuilder {
    fn walk(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if SKIP_TAGS.contains(&name) {
            return;
        }
        if name == "br" {
            self.break_line();
            return;
        }
        if name == "a" {
            self.push_link(element);
            return;
        }

        let block = BLOCK_TAGS.contains(&name);
        if block {
            self.soft_break();
        }
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        self.walk(child_el);
                    }
                }
                _ => {}
            }
        }
        if block {
            self.soft_break();
        }
    }

    fn push_link(&mut self, element: ElementRef<'_>) {
        let text = collapse_whitespace(&element.text().collect::<String>());
        let text = text.trim();
        match element.value().attr("href") {
            Some(href) if !text.is_empty() => {
                self.current.push(Segment::Link {
                    text: strip_controls(text).into_owned(),
                    href: strip_controls(href).into_owned(),
                });
                self.at_space = false;
            }
            _ => self.push_text(text),
        }
    }

    fn push_text(&mut self, raw: &str) {
        let mut collapsed = String::with_capacity(raw.len());
        for c in strip_controls(raw).chars() {
            if c.is_whitespace() {
                if !self.at_space && (!self.current.is_empty() || !collapsed.is_empty()) {
                    collapsed.push(' ');
                }
                self.at_space = true;
            } else {
                collapsed.push(c);
                self.at_space = false;
            }
        }
        if collapsed.is_empty() {
            return;
        }
        match self.current.last_mut() {
            Some(Segment::Text(existing)) => existing.push_str(&collapsed),
            _ => self.current.push(Segment::Text(collapsed)),
        }
    }

    fn break_line(&mut self) {
        let mut line = std::mem::take(&mut self.current);
        trim_line_end(&mut line);
        self.lines.push(line);
        self.at_space = true;
    }

    /// Break only if something is on the current line.
    fn soft_break(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<SegmentLine> {
        self.soft_break();
        while self.lines.first().is_some_and(|l| l.is_empty()) {
            self.lines.remove(0);
        }
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_line_end(line: &mut SegmentLine) {
    if let Some(Segment::Text(text)) = line.last_mut() {
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        if text.is_empty() {
            line.pop();
        }
    }
}
