//! Number grammar validation.
//!
//! A small finite-state recognizer walks the character run of a JSON number
//! and computes its exact byte length without allocating or converting. The
//! caller re-parses the validated span with whatever precision it needs; the
//! typed convenience readers on [`Document`] are layered on top of the same
//! span.
//!
//! [`Document`]: crate::Document

use crate::scanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
}

/// A number terminates at the end of the buffer or at the first structural
/// or whitespace byte; everything in between must fit the grammar.
fn is_end_of_number(b: u8) -> bool {
    matches!(b, b',' | b']' | b'}') || scanner::is_whitespace(b)
}

/// Validates the number starting at `text[pos]` and returns its byte length,
/// or `None` if the run does not match the JSON number production.
///
/// Leading zeros are rejected (`0` may only be followed by `.`, `e`, or
/// `E`), a decimal point and an exponent marker each require at least one
/// following digit, and a bare `-` is rejected.
pub(crate) fn span_len(text: &[u8], pos: usize) -> Option<usize> {
    let mut state = State::Start;
    let mut len = 0;

    while let Some(&b) = text.get(pos + len) {
        if is_end_of_number(b) {
            break;
        }
        state = match (state, b) {
            (State::Start, b'-') => State::Sign,
            (State::Start | State::Sign, b'0') => State::Zero,
            (State::Start | State::Sign, b'1'..=b'9') => State::DecimalInteger,
            (State::Zero | State::DecimalInteger, b'.') => State::DecimalPoint,
            (
                State::Zero | State::DecimalInteger | State::DecimalFraction,
                b'e' | b'E',
            ) => State::DecimalExponent,
            (State::DecimalInteger, b'0'..=b'9') => State::DecimalInteger,
            (State::DecimalPoint | State::DecimalFraction, b'0'..=b'9') => {
                State::DecimalFraction
            }
            (State::DecimalExponent, b'+' | b'-') => State::DecimalExponentSign,
            (
                State::DecimalExponent
                | State::DecimalExponentSign
                | State::DecimalExponentInteger,
                b'0'..=b'9',
            ) => State::DecimalExponentInteger,
            _ => return None,
        };
        len += 1;
    }

    match state {
        State::Zero
        | State::DecimalInteger
        | State::DecimalFraction
        | State::DecimalExponentInteger => Some(len),
        _ => None,
    }
}

/// Lexical hint so the typed readers can distinguish ints from floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    /// No `.` and no exponent.
    Integer(&'a str),
    /// Has `.` or an exponent.
    Float(&'a str),
}

pub(crate) fn lexeme(span: &str) -> NumberLexeme<'_> {
    if span.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
        NumberLexeme::Float(span)
    } else {
        NumberLexeme::Integer(span)
    }
}
