//! The [`ValueWriter`] trait for writing fixed-width values and length-prefixed strings.
//!
//! ```rust
//! use vectorobj_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_len_string("hi")?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![2, 0, 0, 0, b'h', b'i']);
//!     Ok(())
//! }
//! ```

use anyhow::{Result, bail};
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values with a fixed byte order.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Number of bytes written so far.
	fn position(&mut self) -> Result<u64>;

	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		Ok(self.get_writer().write_u64::<E>(value)?)
	}

	fn write_i64(&mut self, value: i64) -> Result<()> {
		Ok(self.get_writer().write_i64::<E>(value)?)
	}

	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		Ok(self.get_writer().write_all(buf)?)
	}

	/// Writes the UTF-8 bytes of `text` without a length prefix.
	fn write_string(&mut self, text: &str) -> Result<()> {
		self.write_slice(text.as_bytes())
	}

	/// Writes an element count as `u32`, failing if it does not fit.
	fn write_count(&mut self, count: usize) -> Result<()> {
		let Ok(count) = u32::try_from(count) else {
			bail!("count {count} does not fit into 32 bits");
		};
		self.write_u32(count)
	}

	/// Writes `text` prefixed by its byte length as `u32`.
	fn write_len_string(&mut self, text: &str) -> Result<()> {
		self.write_count(text.len())?;
		self.write_string(text)
	}
}
