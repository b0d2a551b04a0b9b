//! Terminal-safe text
//!
//! Bot and server text is printed straight to the terminal, so control
//! characters in it would be interpreted as escape sequences (clearing the
//! screen, retitling the window, forging hyperlinks).

use std::borrow::Cow;

/// Drop C0 and C1 control characters, keeping `\n` and `\t`.
pub fn strip_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stripped) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| !is_stripped(c)).collect())
}

fn is_stripped(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}
