//! Text helpers shared by the logging paths.

use std::borrow::Cow;

/// Shorten `text` to at most `max_bytes` bytes for a log line or error
/// excerpt, ending on a char boundary and marking the cut with `…`.
pub fn excerpt(text: &str, max_bytes: usize) -> Cow<'_, str> {
    if text.len() <= max_bytes {
        return Cow::Borrowed(text);
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    Cow::Owned(format!("{}…", &text[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(excerpt("hi", 10), Cow::Borrowed("hi")));
        assert_eq!(excerpt("", 0), "");
    }

    #[test]
    fn long_text_is_marked() {
        assert_eq!(excerpt("hello world", 5), "hello…");
    }

    #[test]
    fn cut_backs_off_to_char_boundary() {
        // 'é' is two bytes; a cut at 2 would split it
        assert_eq!(excerpt("aéb", 2), "a…");
        assert_eq!(excerpt("aéb", 3), "aé…");
    }
}
