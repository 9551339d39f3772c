//! Byte-order aware readers and writers for fixed-width values and length-prefixed strings.
//!
//! The binary cache format is built entirely from these primitives. Readers check every
//! read against the remaining input so that truncated data is reported instead of panicking.

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;
mod value_writer_file;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
pub use value_writer_file::*;
