//! Low-level building blocks shared by the vectorobj crates: a byte tokenizer for JSON
//! input, byte-order aware value readers and writers, and the [`Blob`] byte buffer.

pub mod byte_iterator;

pub mod io;

mod types;
pub use types::*;
