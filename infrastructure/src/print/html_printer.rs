//! HTML print view writer.
//!
//! The document holds one block per message (role label plus content). The
//! welcome markup is embedded as-is; every other message is escaped. Loading
//! the document opens the print dialog, and the window closes once printing
//! is done.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use therabot_application::ports::transcript_printer::{
    PrintError, PrintReceipt, TranscriptPrinter,
};
use therabot_domain::{Message, Transcript, escape_html};
use tracing::{debug, warn};

/// Platform openers, tried in order
const OPENERS: [&str; 2] = ["xdg-open", "open"];

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
h1 { font-size: 1.2em; border-bottom: 1px solid #ccc; padding-bottom: 0.3em; }
.message { margin: 0.6em 0; padding: 0.5em 0.8em; border-radius: 6px; page-break-inside: avoid; }
.label { display: block; font-weight: bold; font-size: 0.8em; margin-bottom: 0.2em; }
.content { white-space: pre-wrap; }
.user { background: #e8f0fe; }
.bot { background: #f1f3f4; }
.system { background: #fef7e0; }
.error { background: #fce8e6; color: #a50e0e; }
a { color: #1a0dab; }";

/// Render the full print document for a transcript.
pub fn render_document(transcript: &Transcript) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Chat transcript</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n");
    html.push_str("<body onload=\"window.print()\" onafterprint=\"window.close()\">\n");
    html.push_str("<h1>Chat transcript</h1>\n");
    for message in transcript.iter() {
        push_message(&mut html, message);
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn push_message(html: &mut String, message: &Message) {
    let content = if message.is_markup {
        message.content.clone()
    } else {
        escape_html(&message.content)
    };
    html.push_str(&format!(
        "<div class=\"message {}\"><span class=\"label\">{}</span><div class=\"content\">{}</div></div>\n",
        message.role.as_str(),
        message.role.label(),
        content
    ));
}

/// Writes the print view to disk and optionally opens it.
pub struct HtmlTranscriptPrinter {
    directory: Option<PathBuf>,
    open_viewer: bool,
}

impl HtmlTranscriptPrinter {
    /// `directory` defaults to the system temp dir when `None`.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            open_viewer: true,
        }
    }

    pub fn with_open_viewer(mut self, open_viewer: bool) -> Self {
        self.open_viewer = open_viewer;
        self
    }

    fn default_location(&self) -> PathBuf {
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        directory.join(format!("therabot-transcript-{}.html", stamp))
    }

    /// Launch the first available platform opener on `path`.
    fn open(&self, path: &Path) -> bool {
        let Some(opener) = OPENERS.iter().find_map(|name| which::which(name).ok()) else {
            debug!("No print viewer found (tried {:?})", OPENERS);
            return false;
        };

        match Command::new(&opener)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => {
                debug!("Opened print view with {}", opener.display());
                true
            }
            Err(e) => {
                warn!("Could not launch {}: {}", opener.display(), e);
                false
            }
        }
    }
}

impl TranscriptPrinter for HtmlTranscriptPrinter {
    fn print(
        &self,
        transcript: &Transcript,
        destination: Option<&Path>,
    ) -> Result<PrintReceipt, PrintError> {
        let location = match destination {
            Some(path) => path.to_path_buf(),
            None => self.default_location(),
        };

        if let Some(parent) = location.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&location, render_document(transcript))?;
        debug!(
            "Wrote print view ({} messages) to {}",
            transcript.len(),
            location.display()
        );

        let opened = self.open_viewer && self.open(&location);
        Ok(PrintReceipt { location, opened })
    }
}
