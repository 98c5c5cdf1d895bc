//! Whitespace scanning over the input buffer.
//!
//! Only the four whitespace characters defined by the JSON specification are
//! recognized: space (U+0020), line feed (U+000A), carriage return (U+000D),
//! and horizontal tab (U+0009).

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Returns the position of the first non-whitespace byte at or after `pos`,
/// or `text.len()` if only whitespace remains.
pub(crate) fn skip_space(text: &[u8], mut pos: usize) -> usize {
    while pos < text.len() && is_whitespace(text[pos]) {
        pos += 1;
    }
    pos
}
