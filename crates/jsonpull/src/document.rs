//! The pull decoder: a reusable [`Decoder`] and the per-document [`Document`]
//! it hands out.
//!
//! Structural bookkeeping is one phase marker per open container, stored in
//! an arena that the decoder preallocates to `max_depth + 1` entries and
//! reuses across documents. After every completed value the decoder runs a
//! single `advance` transition that consumes the separator (or leaves a
//! closer in place for the matching exit call), so the cursor always rests on
//! the start of the next token.
//!
//! Fault handling follows a poison discipline: the first error is stored on
//! the document and every later entry point returns it unchanged without
//! touching the cursor or the phase stack. [`Document::end_read`] reports the
//! final outcome.

use alloc::{string::String, vec::Vec};

use crate::{
    error::Error,
    number::{self, NumberLexeme},
    options::DecoderOptions,
    scanner, string,
};

/// The kind of the next value in the input, as classified by [`Document::peek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The literal `null`.
    Null,
    /// The literal `true` or `false`.
    Boolean,
    /// A quoted string.
    String,
    /// A number.
    Number,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl ValueKind {
    /// Classifies a value by its first byte. `]`, `}`, and anything else
    /// that cannot start a value yield `None`.
    fn classify(b: u8) -> Option<Self> {
        match b {
            b'n' => Some(ValueKind::Null),
            b't' | b'f' => Some(ValueKind::Boolean),
            b'"' => Some(ValueKind::String),
            b'0'..=b'9' | b'-' => Some(ValueKind::Number),
            b'[' => Some(ValueKind::Array),
            b'{' => Some(ValueKind::Object),
            _ => None,
        }
    }
}

/// The structural expectation at one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Top level; exactly one value is expected.
    Root,
    /// In an array; the cursor points at the next value or `]`.
    ArrayStart,
    /// In an array, just behind a `,`.
    ArrayNext,
    /// In an object; the cursor points at the next key or `}`.
    ObjectStart,
    /// In an object; the key has been read and the cursor points at the
    /// value.
    ObjectColon,
}

/// A reusable pull decoder.
///
/// The decoder itself holds only configuration and the preallocated phase
/// arena; all per-document state lives on the [`Document`] returned by
/// [`Decoder::begin_read`]. One decoder can decode any number of documents in
/// sequence, and the borrow on `begin_read` guarantees at most one document
/// is in flight at a time.
#[derive(Debug)]
pub struct Decoder {
    max_depth: usize,
    phases: Vec<Phase>,
}

impl Decoder {
    /// Creates a decoder that allows up to `max_depth` simultaneously open
    /// arrays and objects.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            phases: Vec::with_capacity(max_depth + 1),
        }
    }

    /// Creates a decoder from [`DecoderOptions`].
    #[must_use]
    pub fn with_options(options: DecoderOptions) -> Self {
        Self::new(options.max_depth)
    }

    /// Begins reading one complete JSON text.
    ///
    /// The returned [`Document`] borrows the decoder for the duration of the
    /// read; call [`Document::end_read`] to learn the outcome and release it.
    pub fn begin_read<'dec, 'buf>(&'dec mut self, text: &'buf [u8]) -> Document<'dec, 'buf> {
        self.phases.clear();
        self.phases.push(Phase::Root);
        let pos = scanner::skip_space(text, 0);
        Document {
            decoder: self,
            text,
            pos,
            poison: None,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::with_options(DecoderOptions::default())
    }
}

/// One in-progress read over one input buffer.
///
/// All read operations validate the grammar as they consume it. The first
/// fault poisons the document: every later call returns the same error and
/// leaves the cursor and the container stack untouched, so callers may defer
/// error checking to [`Document::end_read`].
#[derive(Debug)]
pub struct Document<'dec, 'buf> {
    decoder: &'dec mut Decoder,
    text: &'buf [u8],
    pos: usize,
    poison: Option<Error>,
}

impl<'buf> Document<'_, 'buf> {
    /// Ends the read and reports the outcome.
    ///
    /// The outcome is the sticky error if any fault occurred, otherwise
    /// [`Error::InvalidType`] if a container is still open, otherwise
    /// [`Error::InvalidJson`] if non-whitespace input remains after the
    /// top-level value.
    pub fn end_read(self) -> Result<(), Error> {
        if let Some(err) = self.poison {
            return Err(err);
        }
        if self.decoder.phases.len() > 1 {
            return Err(Error::InvalidType);
        }
        if self.pos < self.text.len() {
            return Err(Error::InvalidJson);
        }
        Ok(())
    }

    /// Classifies the next value without consuming anything.
    ///
    /// Returns `None` when the document is poisoned, at a container closer,
    /// or at any byte that cannot start a value. Peeking never moves the
    /// cursor and never poisons.
    #[must_use]
    pub fn peek(&self) -> Option<ValueKind> {
        if self.poison.is_some() {
            return None;
        }
        self.head().and_then(ValueKind::classify)
    }

    /// Reports whether another value is available in the current container.
    ///
    /// Inside an array this is `false` at the closing `]`, inside an object
    /// at the closing `}`. At the top level it is `true` until the single
    /// expected value has been read. A poisoned document has no more values.
    #[must_use]
    pub fn more(&self) -> bool {
        if self.poison.is_some() {
            return false;
        }
        let Some(b) = self.head() else {
            return false;
        };
        match self.phase() {
            Phase::ArrayStart => b != b']',
            Phase::ObjectStart | Phase::ObjectColon => b != b'}',
            Phase::ArrayNext | Phase::Root => true,
        }
    }

    /// Current cursor position in the input buffer, in bytes.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Reads the literal `null`.
    pub fn read_null(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        if self.phase() == Phase::ObjectStart {
            return Err(self.fault(Error::InvalidType));
        }
        match self.head() {
            Some(b'n') => {
                if !self.text[self.pos..].starts_with(b"null") {
                    return Err(self.fault(Error::InvalidJson));
                }
                self.pos += b"null".len();
            }
            _ => return Err(self.fault(Error::InvalidType)),
        }
        self.advance()
    }

    /// Reads the literal `true` or `false`.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.check_poison()?;
        if self.phase() == Phase::ObjectStart {
            return Err(self.fault(Error::InvalidType));
        }
        let value = match self.head() {
            Some(b't') => {
                if !self.text[self.pos..].starts_with(b"true") {
                    return Err(self.fault(Error::InvalidJson));
                }
                self.pos += b"true".len();
                true
            }
            Some(b'f') => {
                if !self.text[self.pos..].starts_with(b"false") {
                    return Err(self.fault(Error::InvalidJson));
                }
                self.pos += b"false".len();
                false
            }
            _ => return Err(self.fault(Error::InvalidType)),
        };
        self.advance()?;
        Ok(value)
    }

    /// Reads a string, returning a freshly decoded copy with all escapes
    /// resolved.
    ///
    /// Inside an object, reading the next key is also done with this method.
    pub fn read_string(&mut self) -> Result<String, Error> {
        self.check_poison()?;
        if self.head() != Some(b'"') {
            return Err(self.fault(Error::InvalidType));
        }
        let (value, pos) = match string::decode(self.text, self.pos) {
            Ok(decoded) => decoded,
            Err(err) => return Err(self.fault(err)),
        };
        self.pos = pos;
        self.advance()?;
        Ok(value)
    }

    /// Reads a number, returning the validated span borrowed from the input
    /// buffer.
    ///
    /// No numeric conversion happens here; the caller re-parses the span
    /// with whatever precision it needs. See [`Document::read_u64`] and
    /// [`Document::read_f64`] for the common conversions.
    pub fn read_number(&mut self) -> Result<&'buf str, Error> {
        self.check_poison()?;
        if self.phase() == Phase::ObjectStart {
            return Err(self.fault(Error::InvalidType));
        }
        if self.head().and_then(ValueKind::classify) != Some(ValueKind::Number) {
            return Err(self.fault(Error::InvalidType));
        }
        let Some(len) = number::span_len(self.text, self.pos) else {
            return Err(self.fault(Error::InvalidJson));
        };
        let text = self.text;
        let span = &text[self.pos..self.pos + len];
        // The grammar only admits ASCII bytes.
        let span = core::str::from_utf8(span).map_err(|_| Error::InvalidJson)?;
        self.pos += len;
        self.advance()?;
        Ok(span)
    }

    /// Reads a number as a `u64`.
    ///
    /// Fails with [`Error::InvalidType`] if the number has a leading `-`, a
    /// fraction, an exponent, or does not fit in 64 bits.
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        let span = self.read_number()?;
        match number::lexeme(span) {
            NumberLexeme::Integer(span) if !span.starts_with('-') => span
                .parse()
                .map_err(|_| self.fault(Error::InvalidType)),
            NumberLexeme::Integer(_) | NumberLexeme::Float(_) => {
                Err(self.fault(Error::InvalidType))
            }
        }
    }

    /// Reads a number as an `f64`.
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let span = self.read_number()?;
        span.parse().map_err(|_| self.fault(Error::InvalidJson))
    }

    /// Descends into an array. The cursor moves past the `[` to the first
    /// element or the closing `]`.
    pub fn enter_array(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        if self.phase() == Phase::ObjectStart {
            return Err(self.fault(Error::InvalidType));
        }
        if self.head() != Some(b'[') {
            return Err(self.fault(Error::InvalidType));
        }
        if self.decoder.phases.len() > self.decoder.max_depth {
            return Err(self.fault(Error::DepthOverflow));
        }
        self.pos = scanner::skip_space(self.text, self.pos + 1);
        self.decoder.phases.push(Phase::ArrayStart);
        Ok(())
    }

    /// Leaves the current array. Valid only at the closing `]`.
    pub fn exit_array(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        if !matches!(self.phase(), Phase::ArrayStart | Phase::ArrayNext) {
            return Err(self.fault(Error::InvalidType));
        }
        if self.head() != Some(b']') {
            return Err(self.fault(Error::InvalidJson));
        }
        self.pos += 1;
        self.decoder.phases.pop();
        self.advance()
    }

    /// Descends into an object. The cursor moves past the `{` to the first
    /// key or the closing `}`.
    pub fn enter_object(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        if self.phase() == Phase::ObjectStart {
            return Err(self.fault(Error::InvalidType));
        }
        if self.head() != Some(b'{') {
            return Err(self.fault(Error::InvalidType));
        }
        if self.decoder.phases.len() > self.decoder.max_depth {
            return Err(self.fault(Error::DepthOverflow));
        }
        self.pos = scanner::skip_space(self.text, self.pos + 1);
        if !matches!(self.head(), Some(b'"' | b'}')) {
            return Err(self.fault(Error::InvalidJson));
        }
        self.decoder.phases.push(Phase::ObjectStart);
        Ok(())
    }

    /// Leaves the current object. Valid only at the closing `}`.
    pub fn exit_object(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        if !matches!(self.phase(), Phase::ObjectStart | Phase::ObjectColon) {
            return Err(self.fault(Error::InvalidType));
        }
        if self.head() != Some(b'}') {
            return Err(self.fault(Error::InvalidJson));
        }
        self.pos += 1;
        self.decoder.phases.pop();
        self.advance()
    }

    fn head(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    fn phase(&self) -> Phase {
        self.decoder.phases.last().copied().unwrap_or(Phase::Root)
    }

    fn set_phase(&mut self, phase: Phase) {
        if let Some(current) = self.decoder.phases.last_mut() {
            *current = phase;
        }
    }

    fn check_poison(&self) -> Result<(), Error> {
        self.poison.map_or(Ok(()), Err)
    }

    fn fault(&mut self, err: Error) -> Error {
        self.poison = Some(err);
        err
    }

    /// Moves the cursor to the start of the next value. Runs exactly once
    /// after every completed value, consuming the separator the current
    /// phase expects and leaving closers in place for the matching exit
    /// call.
    fn advance(&mut self) -> Result<(), Error> {
        self.check_poison()?;
        self.pos = scanner::skip_space(self.text, self.pos);

        match self.phase() {
            Phase::Root => {}
            Phase::ArrayStart => match self.head() {
                Some(b',') => {
                    self.set_phase(Phase::ArrayNext);
                    self.pos = scanner::skip_space(self.text, self.pos + 1);
                }
                Some(b']') => {}
                _ => return Err(self.fault(Error::InvalidJson)),
            },
            Phase::ArrayNext => match self.head() {
                Some(b',') => {
                    self.pos = scanner::skip_space(self.text, self.pos + 1);
                }
                Some(b']') => self.set_phase(Phase::ArrayStart),
                _ => return Err(self.fault(Error::InvalidJson)),
            },
            Phase::ObjectStart => match self.head() {
                // The key has been read; only the key/value separator may
                // follow.
                Some(b':') => {
                    self.set_phase(Phase::ObjectColon);
                    self.pos = scanner::skip_space(self.text, self.pos + 1);
                }
                _ => return Err(self.fault(Error::InvalidJson)),
            },
            Phase::ObjectColon => match self.head() {
                Some(b',') => {
                    self.set_phase(Phase::ObjectStart);
                    self.pos = scanner::skip_space(self.text, self.pos + 1);
                    // The next member must start with a key.
                    if self.head() != Some(b'"') {
                        return Err(self.fault(Error::InvalidJson));
                    }
                }
                Some(b'}') => {}
                _ => return Err(self.fault(Error::InvalidJson)),
            },
        }
        Ok(())
    }
}
