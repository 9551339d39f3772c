//! Byte-level iteration over in-memory text and the small JSON parsing helpers built on it.

mod basics;
mod iterator;

pub use basics::*;
pub use iterator::*;
