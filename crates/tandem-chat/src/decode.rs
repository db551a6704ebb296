//! Incremental UTF-8 stream decoding
//!
//! Response bodies arrive as arbitrary byte chunks, so a multi-byte
//! character can be split across two reads. The decoder carries the
//! incomplete tail of each chunk into the next call instead of emitting
//! replacement characters for it. Genuinely invalid sequences degrade to
//! U+FFFD and are never an error.

/// Incremental UTF-8 decoder with carry-over buffering.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    carry: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning the text that is complete so far.
    ///
    /// An incomplete multi-byte sequence at the end of the chunk is held
    /// back until the next `feed` (or `finish`) completes it.
    pub fn feed(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);

        let mut out = String::new();
        let mut input = bytes.as_slice();

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    return out;
                }
                Err(e) => {
                    let (valid, rest) = input.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        // Invalid sequence: substitute and keep going.
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        // Incomplete sequence at the end: carry it over.
                        None => {
                            self.carry = rest.to_vec();
                            return out;
                        }
                    }
                }
            }
        }
    }

    /// Flush any buffered partial sequence at stream end.
    ///
    /// A dangling incomplete sequence decodes lossily, matching the
    /// substitution behavior for invalid bytes mid-stream.
    pub fn finish(&mut self) -> String {
        let carry = std::mem::take(&mut self.carry);
        String::from_utf8_lossy(&carry).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.feed(b"Hi"), "Hi");
        assert_eq!(decoder.feed(b" there"), " there");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // "héllo" with the two-byte 'é' split between chunks
        let bytes = "h\u{e9}llo".as_bytes();
        let mut decoder = StreamDecoder::new();

        let first = decoder.feed(&bytes[..2]);
        let second = decoder.feed(&bytes[2..]);
        let trailing = decoder.finish();

        assert_eq!(format!("{first}{second}{trailing}"), "héllo");
        assert_eq!(first, "h");
    }

    #[test]
    fn test_four_byte_char_split_three_ways() {
        let bytes = "a\u{1F600}b".as_bytes();
        let mut decoder = StreamDecoder::new();

        let mut out = String::new();
        out.push_str(&decoder.feed(&bytes[..2]));
        out.push_str(&decoder.feed(&bytes[2..4]));
        out.push_str(&decoder.feed(&bytes[4..]));
        out.push_str(&decoder.finish());

        assert_eq!(out, "a\u{1F600}b");
    }

    #[test]
    fn test_invalid_byte_substituted() {
        let mut decoder = StreamDecoder::new();
        let out = decoder.feed(&[b'a', 0xFF, b'b']);
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn test_truncated_sequence_flushed_lossily() {
        let mut decoder = StreamDecoder::new();
        // First byte of a two-byte sequence, never completed
        assert_eq!(decoder.feed(&[0xC3]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }

    #[test]
    fn test_empty_chunk_is_harmless() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.feed(b""), "");
        assert_eq!(decoder.feed("日本".as_bytes()), "日本");
    }

    #[test]
    fn test_concatenation_property() {
        // finish() after feeding arbitrary splits equals decoding the whole
        let text = "caf\u{e9} \u{1F980} na\u{ef}ve\n";
        let bytes = text.as_bytes();

        for split in 0..bytes.len() {
            let mut decoder = StreamDecoder::new();
            let mut out = String::new();
            out.push_str(&decoder.feed(&bytes[..split]));
            out.push_str(&decoder.feed(&bytes[split..]));
            out.push_str(&decoder.finish());
            assert_eq!(out, text, "split at {split}");
        }
    }
}
