//! A peekable cursor over a byte slice with position-aware error reporting.
//!
//! `ByteIterator` always has the *next* byte peeked. `position()` is the offset of that
//! peeked byte, so after a failed `expect_*` call it points at the offending byte.

use anyhow::{Error, anyhow};

const SNIPPET_RADIUS: usize = 12;

/// A cursor over a byte slice with support for peeking, consuming and error reporting.
///
/// * `bytes` - The input.
/// * `position` - Offset of the peeked byte; equals `bytes.len()` at the end.
/// * `is_debug_enabled` - Whether errors include a snippet of the input around `position`.
pub struct ByteIterator<'a> {
	bytes: &'a [u8],
	position: usize,
	is_debug_enabled: bool,
}

impl<'a> ByteIterator<'a> {
	/// Creates a new `ByteIterator` over `bytes`.
	///
	/// With `debug` enabled, errors created by [`ByteIterator::format_error`] quote the
	/// surrounding input.
	#[must_use]
	pub fn from_slice(bytes: &'a [u8], debug: bool) -> Self {
		ByteIterator {
			bytes,
			position: 0,
			is_debug_enabled: debug,
		}
	}

	#[must_use]
	pub fn from_str(text: &'a str, debug: bool) -> Self {
		Self::from_slice(text.as_bytes(), debug)
	}

	/// Builds an error that names the current byte offset and line.
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		let line = self.line();
		if self.is_debug_enabled {
			anyhow!("{msg} at position {} (line {line}): {}", self.position, self.snippet())
		} else {
			anyhow!("{msg} at position {} (line {line})", self.position)
		}
	}

	fn snippet(&self) -> String {
		let start = self.position.saturating_sub(SNIPPET_RADIUS);
		let end = (self.position + SNIPPET_RADIUS).min(self.bytes.len());
		let mut text = String::from_utf8_lossy(&self.bytes[start..end]).replace(['\n', '\r', '\t'], " ");
		if end == self.bytes.len() {
			text.push_str("<EOF>");
		}
		text
	}

	/// Offset of the next unconsumed byte.
	#[inline]
	#[must_use]
	pub fn position(&self) -> usize {
		self.position
	}

	/// 1-based line number of the next unconsumed byte.
	#[must_use]
	pub fn line(&self) -> usize {
		let end = self.position.min(self.bytes.len());
		self.bytes[..end].iter().filter(|b| **b == b'\n').count() + 1
	}

	#[inline]
	#[must_use]
	pub fn peek(&self) -> Option<u8> {
		self.bytes.get(self.position).copied()
	}

	#[inline]
	pub fn advance(&mut self) {
		if self.position < self.bytes.len() {
			self.position += 1;
		}
	}

	#[inline]
	pub fn consume(&mut self) -> Option<u8> {
		let current_byte = self.peek();
		self.advance();
		current_byte
	}

	/// Consumes and returns the next byte, failing at the end of input.
	#[inline]
	pub fn expect_next_byte(&mut self) -> anyhow::Result<u8> {
		match self.peek() {
			Some(byte) => {
				self.advance();
				Ok(byte)
			}
			None => Err(self.format_error("unexpected end")),
		}
	}

	/// Returns the next byte without consuming it, failing at the end of input.
	#[inline]
	pub fn expect_peeked_byte(&self) -> anyhow::Result<u8> {
		self.peek().ok_or_else(|| self.format_error("unexpected end"))
	}

	pub fn skip_whitespace(&mut self) {
		while let Some(byte) = self.peek() {
			if !byte.is_ascii_whitespace() {
				break;
			}
			self.advance();
		}
	}

	/// Fails unless only whitespace remains.
	pub fn expect_end(&mut self) -> anyhow::Result<()> {
		self.skip_whitespace();
		match self.peek() {
			None => Ok(()),
			Some(_) => Err(self.format_error("unexpected trailing characters")),
		}
	}
}
