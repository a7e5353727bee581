//! The two fixed-size wire frames and the formatting rules between them.
//!
//! There are no length prefixes and no delimiters: framing is entirely
//! fixed-size. A nickname frame is 16 bytes, a message frame is 512 bytes,
//! both NUL-padded.

/// Size of a nickname frame, in bytes.
pub const MAX_NICKNAME: usize = 16;

/// Size of a message frame, in bytes.
pub const MAX_FRAME: usize = 512;

/// Bytes a client must leave free for the server's timestamp prefix.
pub const TIMESTAMP_PAD: usize = 16;

/// Longest payload a client may type: the rest of the frame is reserved for
/// the timestamp and nickname prefix the server prepends when broadcasting.
pub const MAX_PAYLOAD: usize = MAX_FRAME - MAX_NICKNAME - TIMESTAMP_PAD;

/// A 16-byte NUL-padded nickname, sent once by the client right after
/// connecting. Never acknowledged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NicknameFrame(pub [u8; MAX_NICKNAME]);

impl NicknameFrame {
    /// Encode `raw` into a nickname frame: up to 15 bytes are copied, the
    /// rest is NUL padding. Longer names are truncated silently, on a
    /// character boundary.
    pub fn encode(raw: &str) -> NicknameFrame {
        let raw = truncate_to(raw, MAX_NICKNAME - 1);
        let mut bytes = [0u8; MAX_NICKNAME];
        bytes[..raw.len()].copy_from_slice(raw.as_bytes());
        NicknameFrame(bytes)
    }

    /// The name as sent, without padding.
    pub fn name(&self) -> String {
        text_of(&self.0)
    }

    /// The display prefix used in broadcast frames: the name followed by
    /// `": "`. If the name is too long for the suffix to fit in 16 bytes,
    /// the suffix overwrites its tail, so the result always ends in `": "`
    /// and never exceeds 16 bytes.
    pub fn formatted(&self) -> String {
        let name = self.name();
        if name.len() <= MAX_NICKNAME - 2 {
            format!("{}: ", name)
        } else {
            format!("{}: ", truncate_to(&name, MAX_NICKNAME - 2))
        }
    }
}

/// A 512-byte NUL-padded message frame. Inbound frames carry a bare payload;
/// outbound frames carry timestamp + nickname + payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageFrame(pub [u8; MAX_FRAME]);

impl MessageFrame {
    /// Encode `text` as a payload frame, truncating to fit.
    pub fn encode(text: &str) -> MessageFrame {
        let text = truncate_to(text, MAX_FRAME);
        let mut bytes = [0u8; MAX_FRAME];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        MessageFrame(bytes)
    }

    /// Encode a line typed by the user, truncated to the payload capacity
    /// so the server's timestamp and nickname prefix still fit when the
    /// frame is rebroadcast.
    pub fn encode_payload(text: &str) -> MessageFrame {
        MessageFrame::encode(truncate_to(text, MAX_PAYLOAD))
    }

    /// The textual content of the frame, up to the first NUL.
    pub fn text(&self) -> String {
        text_of(&self.0)
    }
}

/// Build the frame the server broadcasts for one message: timestamp text,
/// formatted nickname, and the payload, concatenated. The combined text is
/// truncated to the frame size rather than allowed to overflow.
pub fn format_broadcast(timestamp: &str, nickname: &str, payload: &MessageFrame) -> MessageFrame {
    let mut formatted = String::with_capacity(MAX_FRAME);
    formatted.push_str(timestamp);
    formatted.push_str(nickname);
    formatted.push_str(&payload.text());
    MessageFrame::encode(&formatted)
}

/// The longest prefix of `s` that fits in `max` bytes without splitting a
/// character.
fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn text_of(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_roundtrip() {
        let frame = NicknameFrame::encode("alice");
        assert_eq!(frame.name(), "alice");
        assert_eq!(frame.formatted(), "alice: ");
    }

    #[test]
    fn nickname_truncates_to_fifteen_bytes() {
        let frame = NicknameFrame::encode("a-very-long-nickname");
        assert_eq!(frame.name(), "a-very-long-nic");
        assert_eq!(frame.name().len(), MAX_NICKNAME - 1);
    }

    #[test]
    fn long_nickname_still_ends_in_suffix() {
        let frame = NicknameFrame::encode("fifteen-chars-x");
        let formatted = frame.formatted();
        assert!(formatted.ends_with(": "));
        assert!(formatted.len() <= MAX_NICKNAME);
        assert_eq!(formatted, "fifteen-chars-: ");
    }

    #[test]
    fn short_nickname_suffix_fits_within_frame() {
        // 14 bytes is the longest name that keeps the suffix without loss.
        let frame = NicknameFrame::encode("exactly-14-chr");
        assert_eq!(frame.formatted(), "exactly-14-chr: ");
        assert_eq!(frame.formatted().len(), MAX_NICKNAME);
    }

    #[test]
    fn nickname_truncation_respects_char_boundaries() {
        let frame = NicknameFrame::encode("ααααααααα"); // 9 chars, 18 bytes
        assert_eq!(frame.name(), "ααααααα"); // 14 bytes
    }

    #[test]
    fn payload_roundtrip() {
        let frame = MessageFrame::encode("hi there");
        assert_eq!(frame.text(), "hi there");
        assert_eq!(frame.0[8], 0);
    }

    #[test]
    fn payload_is_capped_below_the_frame_size() {
        let frame = MessageFrame::encode_payload(&"y".repeat(MAX_FRAME));
        assert_eq!(frame.text().len(), MAX_PAYLOAD);
    }

    #[test]
    fn broadcast_concatenates_in_order() {
        let payload = MessageFrame::encode("hi");
        let frame = format_broadcast("[2026-08-25 12:00:00] ", "alice: ", &payload);
        assert_eq!(frame.text(), "[2026-08-25 12:00:00] alice: hi");
    }

    #[test]
    fn broadcast_truncates_instead_of_overflowing() {
        let payload = MessageFrame::encode(&"x".repeat(MAX_PAYLOAD));
        let frame = format_broadcast("[2026-08-25 12:00:00] ", "alice: ", &payload);
        let text = frame.text();
        // 22-byte timestamp + 7-byte nickname + 480-byte payload exceeds the
        // frame; the payload tail is cut, never the prefix.
        assert_eq!(text.len(), MAX_FRAME);
        assert!(text.starts_with("[2026-08-25 12:00:00] alice: xxx"));
    }

    #[test]
    fn empty_nickname_formats_as_bare_suffix() {
        assert_eq!(NicknameFrame::encode("").formatted(), ": ");
    }
}
