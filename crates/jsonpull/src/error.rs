use thiserror::Error;

/// Errors reported by the decoder.
///
/// The first error encountered during a read poisons the [`Document`]: every
/// later call returns the same error without moving the cursor, and
/// [`Document::end_read`] reports it as the final outcome.
///
/// [`Document`]: crate::Document
/// [`Document::end_read`]: crate::Document::end_read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The input violates the JSON grammar: a bad escape or number shape, an
    /// unterminated string, a misplaced structural token, a surrogate-pair
    /// violation, invalid raw UTF-8, or trailing garbage after the top-level
    /// value.
    #[error("invalid JSON")]
    InvalidJson,
    /// The requested read does not match the next value's kind, an array or
    /// object was used where an object key is required, a typed number read
    /// was applied to an out-of-shape or out-of-range number, or the document
    /// ended with containers still open.
    #[error("value type mismatch")]
    InvalidType,
    /// Container nesting exceeds the configured maximum depth.
    #[error("maximum nesting depth exceeded")]
    DepthOverflow,
}
