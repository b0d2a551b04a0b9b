//! Event frame decoding for streamed replies.
//!
//! A streamed `/chat` body is a sequence of frames separated by a blank line:
//!
//! ```text
//! data: {"delta":"Hel"}\n\n
//! data: {"delta":"lo"}\n\n
//! data: {"done":true}\n\n
//! ```
//!
//! Lines may end in `\n`, `\r\n` or a bare `\r`.
//!
//! Network chunks do not line up with frames, nor with UTF-8 character
//! boundaries. [`FrameDecoder`] keeps both kinds of leftovers between calls
//! to [`push`](FrameDecoder::push).

use tracing::trace;

/// Stateful decoder from raw body bytes to frame payloads.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
    /// Decoded text not yet terminated by a blank line
    buffer: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return the payloads of all frames it
    /// completed, in order.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.decode_utf8(bytes);
        self.drain_frames()
    }

    /// End of body: return the payload of an unterminated last frame, if any.
    ///
    /// Incomplete UTF-8 left at this point is replaced with U+FFFD.
    pub fn finish(mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.buffer.push_str(&rest);
            self.pending.clear();
        }
        let tail = self.buffer.replace("\r\n", "\n").replace('\r', "\n");
        if tail.trim().is_empty() {
            return None;
        }
        parse_frame(&tail)
    }

    fn decode_utf8(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        let mut start = 0;
        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    self.pending.clear();
                    return;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&self.pending[start..valid_end]) {
                        self.buffer.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes
                            self.pending.drain(..valid_end);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Rewrite line endings to `\n`. A trailing `\r` is held back since
    /// the next chunk may start with its `\n`.
    fn normalize_line_endings(&mut self) {
        if !self.buffer.contains('\r') {
            return;
        }
        let held = self.buffer.ends_with('\r');
        let end = self.buffer.len() - usize::from(held);
        let mut normalized = self.buffer[..end].replace("\r\n", "\n").replace('\r', "\n");
        if held {
            normalized.push('\r');
        }
        self.buffer = normalized;
    }

    fn drain_frames(&mut self) -> Vec<String> {
        self.normalize_line_endings();

        let mut payloads = Vec::new();
        while let Some(end) = self.buffer.find("\n\n") {
            let frame: String = self.buffer.drain(..end + 2).collect();
            match parse_frame(&frame[..end]) {
                Some(payload) => payloads.push(payload),
                None => trace!("Skipping frame without data: {:?}", frame),
            }
        }
        payloads
    }
}

/// Extract the payload of one frame.
///
/// `data:` lines are joined with `\n`; one space after the colon is
/// stripped. Comment lines (starting with `:`) and other fields are
/// ignored. Returns `None` when the frame carries no data.
fn parse_frame(frame: &str) -> Option<String> {
    let mut data: Option<String> = None;
    for line in frame.lines() {
        if line.starts_with(':') {
            continue;
        }
        let Some(rest) = line.strip_prefix("data:") else {
            continue;
        };
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        match data.as_mut() {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(rest);
            }
            None => data = Some(rest.to_string()),
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_with_several_frames() {
        let mut decoder = FrameDecoder::new();
        let payloads =
            decoder.push(b"data: {\"delta\":\"Hel\"}\n\ndata: {\"delta\":\"lo\"}\n\ndata: {\"done\":true}\n\n");
        assert_eq!(
            payloads,
            vec![
                r#"{"delta":"Hel"}"#,
                r#"{"delta":"lo"}"#,
                r#"{"done":true}"#,
            ]
        );
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(b"data: {\"del").is_empty());
        assert!(decoder.push(b"ta\":\"x\"}\n").is_empty());
        assert_eq!(decoder.push(b"\n"), vec![r#"{"delta":"x"}"#]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let frame = "data: {\"delta\":\"caf\u{e9} \u{1f600}\"}\n\n".as_bytes();
        // Split inside the two-byte é and again inside the four-byte emoji
        let e_acute = frame.iter().position(|&b| b == 0xC3).unwrap();
        let emoji = frame.iter().position(|&b| b == 0xF0).unwrap();

        let mut decoder = FrameDecoder::new();
        let mut payloads = decoder.push(&frame[..e_acute + 1]);
        payloads.extend(decoder.push(&frame[e_acute + 1..emoji + 2]));
        payloads.extend(decoder.push(&frame[emoji + 2..]));

        assert_eq!(payloads, vec!["{\"delta\":\"caf\u{e9} \u{1f600}\"}"]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let body = "data: {\"delta\":\"\u{3053}\u{3093}\"}\n\ndata: {\"done\":true}\n\n";
        let mut decoder = FrameDecoder::new();
        let mut payloads = Vec::new();
        for byte in body.as_bytes() {
            payloads.extend(decoder.push(std::slice::from_ref(byte)));
        }
        assert_eq!(
            payloads,
            vec!["{\"delta\":\"\u{3053}\u{3093}\"}", r#"{"done":true}"#]
        );
    }

    #[test]
    fn test_crlf_separators() {
        let mut decoder = FrameDecoder::new();
        let mut payloads = decoder.push(b"data: {\"delta\":\"a\"}\r");
        payloads.extend(decoder.push(b"\n\r\ndata: {\"done\":true}\r\n\r\n"));
        assert_eq!(payloads, vec![r#"{"delta":"a"}"#, r#"{"done":true}"#]);
    }

    #[test]
    fn test_bare_cr_separators() {
        let mut decoder = FrameDecoder::new();
        let mut payloads = decoder.push(b"data: {\"delta\":\"a\"}\r");
        payloads.extend(decoder.push(b"\rdata: {\"done\":true}\r\r"));
        // The last `\r` could still be the start of a `\r\n`
        assert_eq!(payloads, vec![r#"{"delta":"a"}"#]);
        assert_eq!(decoder.finish(), Some(r#"{"done":true}"#.to_string()));
    }

    #[test]
    fn test_bare_cr_in_unterminated_frame() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(b": ping\r\rdata: {\"done\":true}\r").is_empty());
        assert_eq!(decoder.finish(), Some(r#"{"done":true}"#.to_string()));
    }

    #[test]
    fn test_comments_and_other_fields_are_ignored() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.push(b": keep-alive\n\nevent: message\nid: 7\ndata: {\"done\":true}\n\n");
        assert_eq!(payloads, vec![r#"{"done":true}"#]);
    }

    #[test]
    fn test_data_without_space_and_multiline_data() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.push(b"data:{\"delta\":\ndata: \"x\"}\n\n");
        assert_eq!(payloads, vec!["{\"delta\":\n\"x\"}"]);
    }

    #[test]
    fn test_finish_returns_unterminated_frame() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(b"data: {\"done\":true}").is_empty());
        assert_eq!(decoder.finish(), Some(r#"{"done":true}"#.to_string()));
    }

    #[test]
    fn test_finish_on_clean_end_is_none() {
        let mut decoder = FrameDecoder::new();
        decoder.push(b"data: {\"done\":true}\n\n");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_invalid_byte_becomes_replacement_character() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.push(b"data: {\"delta\":\"a\xFFb\"}\n\n");
        assert_eq!(payloads, vec!["{\"delta\":\"a\u{FFFD}b\"}"]);
    }
}
