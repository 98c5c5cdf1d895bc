//! String decoding: unescapes a quoted JSON string into an owned buffer.
//!
//! The decoder validates as it copies: raw control bytes are rejected, the
//! eight single-character escapes map to their literals, `\uXXXX` escapes are
//! decoded as UTF-16 code units (combining surrogate pairs into one code
//! point before re-encoding as UTF-8), and raw multi-byte sequences are
//! checked for valid continuation bytes. On any fault the partially decoded
//! buffer is dropped and nothing is handed to the caller.

use alloc::string::String;

use crate::error::Error;

/// Decodes the quoted string whose opening `"` is at `text[pos]`.
///
/// Returns the decoded string and the position just past the closing quote.
pub(crate) fn decode(text: &[u8], mut pos: usize) -> Result<(String, usize), Error> {
    debug_assert_eq!(text.get(pos), Some(&b'"'));
    pos += 1;

    let mut out = String::new();
    loop {
        match *text.get(pos).ok_or(Error::InvalidJson)? {
            b'"' => return Ok((out, pos + 1)),
            b'\\' => pos = unescape(text, pos + 1, &mut out)?,
            // Raw control characters are not allowed inside strings.
            0x00..=0x1F => return Err(Error::InvalidJson),
            // Lead bytes of 2-, 3-, and 4-byte UTF-8 sequences. 0xC0/0xC1
            // and 0xF5..=0xFF can never start a valid sequence.
            b @ (0xC2..=0xDF | 0xE0..=0xEF | 0xF0..=0xF4) => {
                let want = if b < 0xE0 {
                    2
                } else if b < 0xF0 {
                    3
                } else {
                    4
                };
                let (ch, n) = bstr::decode_utf8(&text[pos..]);
                match ch {
                    Some(ch) if n == want => {
                        out.push(ch);
                        pos += n;
                    }
                    _ => return Err(Error::InvalidJson),
                }
            }
            0x80..=0xC1 | 0xF5..=0xFF => return Err(Error::InvalidJson),
            b => {
                out.push(char::from(b));
                pos += 1;
            }
        }
    }
}

/// Decodes one escape sequence; `pos` is just past the backslash. Returns the
/// position of the first byte after the sequence.
fn unescape(text: &[u8], pos: usize, out: &mut String) -> Result<usize, Error> {
    let literal = match *text.get(pos).ok_or(Error::InvalidJson)? {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{0008}',
        b'f' => '\u{000C}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return unescape_unicode(text, pos + 1, out),
        _ => return Err(Error::InvalidJson),
    };
    out.push(literal);
    Ok(pos + 1)
}

/// Decodes a `\uXXXX` escape; `pos` is at the first hex digit. A high
/// surrogate must be followed immediately by a `\uXXXX` low surrogate, and
/// the pair is combined into a single code point. A lone surrogate of either
/// half is a fault.
fn unescape_unicode(text: &[u8], mut pos: usize, out: &mut String) -> Result<usize, Error> {
    let unit = utf16_unit(text, pos)?;
    pos += 4;

    let code_point = match unit {
        0xD800..=0xDBFF => {
            if text.get(pos..pos + 2) != Some(b"\\u".as_slice()) {
                return Err(Error::InvalidJson);
            }
            pos += 2;

            let low = utf16_unit(text, pos)?;
            pos += 4;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::InvalidJson);
            }

            0x10000 + (u32::from(unit) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00)
        }
        0xDC00..=0xDFFF => return Err(Error::InvalidJson),
        _ => u32::from(unit),
    };

    // With surrogates paired or rejected above, the code point is always a
    // valid scalar value.
    out.push(char::from_u32(code_point).ok_or(Error::InvalidJson)?);
    Ok(pos)
}

/// Reads four hex digits as one UTF-16 code unit. No unicode validation
/// happens here; surrogate handling is the caller's concern.
fn utf16_unit(text: &[u8], pos: usize) -> Result<u16, Error> {
    let digits = text.get(pos..pos + 4).ok_or(Error::InvalidJson)?;

    let mut unit = 0u16;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 0x0A,
            b'A'..=b'F' => d - b'A' + 0x0A,
            _ => return Err(Error::InvalidJson),
        };
        unit = (unit << 4) | u16::from(nibble);
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::decode;
    use crate::error::Error;

    fn ok(text: &[u8]) -> (alloc::string::String, usize) {
        decode(text, 0).unwrap()
    }

    #[test]
    fn plain_ascii() {
        let (s, end) = ok(br#""hello""#);
        assert_eq!(s, "hello");
        assert_eq!(end, 7);
    }

    #[test]
    fn empty_string() {
        let (s, end) = ok(br#""""#);
        assert_eq!(s, "");
        assert_eq!(end, 2);
    }

    #[test]
    fn single_character_escapes() {
        let (s, _) = ok(br#""\" \\ \/ \b \f \n \r \t""#);
        assert_eq!(s, "\" \\ / \u{8} \u{c} \n \r \t");
    }

    #[test]
    fn unicode_escape_bmp() {
        let (s, _) = ok(b"\"\\u0041\\u00e9\\u4e16\"");
        assert_eq!(s, "A\u{e9}\u{4e16}");
    }

    #[test]
    fn surrogate_pair_combines() {
        let (s, _) = ok(b"\"\\uD83D\\uDE00\"");
        assert_eq!(s, "\u{1f600}");
    }

    #[test]
    fn raw_multibyte_passthrough() {
        let (s, _) = ok("\"caré 世 🎉\"".as_bytes());
        assert_eq!(s, "caré 世 🎉");
    }

    #[rstest]
    #[case::unterminated(&b"\"abc"[..])]
    #[case::raw_control(&b"\"a\x01b\""[..])]
    #[case::raw_newline(&b"\"a\nb\""[..])]
    #[case::bad_escape(&br#""\x""#[..])]
    #[case::short_hex(&br#""\u00""#[..])]
    #[case::bad_hex(&br#""\u00g0""#[..])]
    #[case::lone_low_surrogate(&br#""\uDC00""#[..])]
    #[case::lone_high_surrogate(&br#""\uD800""#[..])]
    #[case::high_then_escape(&br#""\uD800\n""#[..])]
    #[case::high_then_bmp(&br#""\uD800A""#[..])]
    #[case::high_then_high(&br#""\uD800\uD800""#[..])]
    #[case::bad_continuation(&b"\"\xC3\x28\""[..])]
    #[case::truncated_sequence(&b"\"\xE2\x82\""[..])]
    #[case::overlong(&b"\"\xC0\xAF\""[..])]
    #[case::stray_continuation(&b"\"\x80\""[..])]
    #[case::utf8_surrogate(&b"\"\xED\xA0\x80\""[..])]
    #[case::beyond_max_scalar(&b"\"\xF5\x80\x80\x80\""[..])]
    fn faults(#[case] text: &[u8]) {
        assert_eq!(decode(text, 0).unwrap_err(), Error::InvalidJson);
    }

    #[test]
    fn del_byte_is_allowed() {
        // 0x7F is not a control character as far as JSON is concerned.
        let (s, _) = ok(b"\"\x7f\"");
        assert_eq!(s, "\u{7f}");
    }
}
