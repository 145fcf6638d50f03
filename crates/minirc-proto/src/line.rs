//! CRLF line framing for tokio.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;
use crate::message::Message;

/// Maximum outbound line length in octets, including the CRLF terminator.
pub const MAX_LINE_LEN: usize = 512;

/// Codec that frames inbound bytes into CRLF-terminated lines and writes
/// outbound [`Message`]s with the protocol size cap.
///
/// Inbound lines have no length cap; a line is complete only at the first
/// CR LF pair, so a lone LF does not terminate it. Outbound lines longer
/// than 512 octets are silently truncated to 510 payload octets plus CRLF.
pub struct LineCodec {
    /// Index of the next byte to examine as a LF candidate.
    next_index: usize,
}

impl LineCodec {
    pub fn new() -> LineCodec {
        LineCodec { next_index: 0 }
    }
}

impl Default for LineCodec {
    fn default() -> LineCodec {
        LineCodec::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        let mut i = self.next_index.max(1);
        while i < src.len() {
            if src[i] == b'\n' && src[i - 1] == b'\r' {
                let line = src.split_to(i + 1);
                self.next_index = 0;
                let payload = &line[..line.len() - 2];
                return Ok(Some(String::from_utf8_lossy(payload).into_owned()));
            }
            i += 1;
        }

        // No complete line yet; remember where the scan stopped.
        self.next_index = src.len();
        Ok(None)
    }
}

impl Encoder<Message> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let mut line = msg.to_string();

        if line.len() > MAX_LINE_LEN - 2 {
            let mut cut = MAX_LINE_LEN - 2;
            while !line.is_char_boundary(cut) {
                cut -= 1;
            }
            line.truncate(cut);
        }

        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Command, Prefix};

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("NICK alice\r\nJOIN #chan\r\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("NICK alice".into()));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("JOIN #chan".into()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("NICK al");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"ice\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("NICK alice".into()));
    }

    #[test]
    fn test_decode_crlf_split_across_chunks() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING abc\r");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING abc".into()));
    }

    #[test]
    fn test_decode_lone_lf_does_not_terminate() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("NICK\nalice\r\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("NICK\nalice".into()));
    }

    #[test]
    fn test_encode_appends_crlf() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        let msg = Message::from(Command::NICK("alice".into()));

        codec.encode(msg, &mut buf).unwrap();
        assert_eq!(&buf[..], b"NICK alice\r\n");
    }

    #[test]
    fn test_encode_truncates_long_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        let text = "x".repeat(600);
        let msg = Message::from(Command::PRIVMSG("#chan".into(), text))
            .with_prefix(Prefix::Nick("alice".into()));

        codec.encode(msg, &mut buf).unwrap();
        assert_eq!(buf.len(), MAX_LINE_LEN);
        assert!(buf.ends_with(b"\r\n"));
        assert!(!buf[..MAX_LINE_LEN - 2].contains(&b'\r'));
    }

    #[test]
    fn test_encode_short_line_untouched() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        let msg = Message::from(Command::PRIVMSG("#chan".into(), "hi".into()))
            .with_prefix(Prefix::Nick("alice".into()));

        codec.encode(msg, &mut buf).unwrap();
        assert_eq!(&buf[..], b":alice PRIVMSG #chan :hi\r\n");
    }
}
