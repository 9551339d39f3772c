//! The [`ValueReader`] trait for reading fixed-width values from an in-memory source.
//!
//! ```rust
//! use vectorobj_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let data = &[0x01, 0x02, 0x03, 0x04];
//!
//!     let mut reader_le = ValueReaderSlice::new_le(data);
//!     assert_eq!(reader_le.read_u32()?, 0x04030201);
//!
//!     let mut reader_be = ValueReaderSlice::new_be(data);
//!     assert_eq!(reader_be.read_u32()?, 0x01020304);
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result, bail};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::Read;

/// A trait for reading values with a fixed byte order.
///
/// Every read first checks that enough bytes remain, so a truncated input fails with
/// "unexpected end of data" and the position of the failed read.
pub trait ValueReader<E: ByteOrder> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn Read;

	/// Total length of the readable data.
	fn len(&self) -> u64;

	/// Current read offset.
	fn position(&self) -> u64;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	fn has_remaining(&self) -> bool {
		self.remaining() > 0
	}

	/// Fails unless at least `length` more bytes are available.
	fn ensure_remaining(&self, length: u64) -> Result<()> {
		if self.remaining() < length {
			bail!(
				"unexpected end of data at offset {}: needed {length} bytes, {} left",
				self.position(),
				self.remaining()
			);
		}
		Ok(())
	}

	fn read_u8(&mut self) -> Result<u8> {
		self.ensure_remaining(1)?;
		Ok(self.get_reader().read_u8()?)
	}

	fn read_u32(&mut self) -> Result<u32> {
		self.ensure_remaining(4)?;
		Ok(self.get_reader().read_u32::<E>()?)
	}

	fn read_u64(&mut self) -> Result<u64> {
		self.ensure_remaining(8)?;
		Ok(self.get_reader().read_u64::<E>()?)
	}

	fn read_i64(&mut self) -> Result<i64> {
		self.ensure_remaining(8)?;
		Ok(self.get_reader().read_i64::<E>()?)
	}

	fn read_f64(&mut self) -> Result<f64> {
		self.ensure_remaining(8)?;
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads `length` bytes and decodes them as UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		self.ensure_remaining(length)?;
		let mut vec = vec![0u8; length as usize];
		self.get_reader().read_exact(&mut vec)?;
		String::from_utf8(vec).context("invalid UTF-8 in string")
	}

	/// Reads a string prefixed by its byte length as `u32`.
	fn read_len_string(&mut self) -> Result<String> {
		let length = self.read_u32()?;
		self.read_string(u64::from(length))
	}

	/// Reads an element count as `u32`.
	///
	/// The count is rejected if `count * min_item_bytes` exceeds the remaining input, which keeps
	/// corrupt counts from triggering huge allocations.
	fn read_count(&mut self, min_item_bytes: u64) -> Result<usize> {
		let offset = self.position();
		let count = u64::from(self.read_u32()?);
		if count.saturating_mul(min_item_bytes) > self.remaining() {
			bail!(
				"count {count} at offset {offset} exceeds the remaining {} bytes",
				self.remaining()
			);
		}
		Ok(count as usize)
	}
}
