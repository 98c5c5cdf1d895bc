//! A pull-style JSON decoder for complete in-memory documents.
//!
//! Unlike a tree parser, `jsonpull` never materializes a document object
//! model. The caller walks the document value-by-value: peek at the kind of
//! the next value, read it (descending into arrays and objects as needed),
//! and check [`Document::more`] between siblings. The grammar is validated
//! incrementally as each value is consumed, with one phase marker per open
//! container and no backtracking.
//!
//! A [`Decoder`] is reusable: [`Decoder::begin_read`] attaches an input
//! buffer and returns a [`Document`], and [`Document::end_read`] reports the
//! outcome and releases the decoder for the next document. Once any fault is
//! detected, the document is *poisoned*: every subsequent call is a no-op
//! returning the same error, so a caller may decode optimistically and check
//! only the final result.
//!
//! # Examples
//!
//! ```rust
//! use jsonpull::Decoder;
//!
//! let mut decoder = Decoder::default();
//! let mut doc = decoder.begin_read(br#"{ "foo": 42, "bar": 43 }"#);
//!
//! doc.enter_object().unwrap();
//! while doc.more() {
//!     let key = doc.read_string().unwrap();
//!     let value = doc.read_u64().unwrap();
//!     println!("{key}: {value}");
//! }
//! doc.exit_object().unwrap();
//! doc.end_read().unwrap();
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod document;
mod error;
mod number;
mod options;
mod scanner;
mod string;

pub use document::{Decoder, Document, ValueKind};
pub use error::Error;
pub use options::DecoderOptions;
