//! Small parsing helpers built on top of [`ByteIterator`](super::iterator::ByteIterator).
//!
//! These functions implement the subset of JSON needed to stream GeoJSON into typed
//! structures without building an intermediate document tree:
//! - `parse_tag` for matching fixed ASCII tags (`true`, `false`, `null`)
//! - `parse_quoted_json_string` for string literals including `\uXXXX` escapes and surrogate pairs
//! - `parse_number_as_string` and `parse_number_as<T>` for JSON number syntax
//! - `parse_object_entries` and `parse_array_entries` to walk object/array contents
//! - `skip_json_value` to step over values the caller is not interested in
//!
//! Every function leaves the iterator positioned at the first byte after the token it read.

use super::iterator::ByteIterator;
use anyhow::{Result, bail};
use std::str::FromStr;

/// Nesting limit for [`skip_json_value`].
pub const MAX_SKIP_DEPTH: usize = 128;

/// Match a fixed ASCII tag at the current iterator position.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_tag};
/// let mut it = ByteIterator::from_str("null", true);
/// parse_tag(&mut it, "null").unwrap();
/// ```
pub fn parse_tag(iter: &mut ByteIterator, tag: &str) -> Result<()> {
	for c in tag.bytes() {
		if iter.expect_peeked_byte()? != c {
			bail!(iter.format_error(&format!("unexpected character while parsing tag '{tag}'")));
		}
		iter.advance();
	}
	Ok(())
}

fn parse_hex4(iter: &mut ByteIterator) -> Result<u16> {
	let mut code = 0u16;
	for _ in 0..4 {
		let byte = iter.expect_peeked_byte()?;
		let digit = (byte as char)
			.to_digit(16)
			.ok_or_else(|| iter.format_error("invalid unicode escape"))?;
		iter.advance();
		code = (code << 4) | digit as u16;
	}
	Ok(code)
}

/// Parse a JSON quoted string literal and return it as `String`.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_quoted_json_string};
/// let mut it = ByteIterator::from_str("\"he\\nllo\"", true);
/// assert_eq!(parse_quoted_json_string(&mut it).unwrap(), "he\nllo");
/// ```
pub fn parse_quoted_json_string(iter: &mut ByteIterator) -> Result<String> {
	iter.skip_whitespace();
	if iter.expect_peeked_byte()? != b'"' {
		bail!(iter.format_error("expected '\"' while parsing a string"));
	}
	iter.advance();

	let mut bytes = Vec::with_capacity(32);

	loop {
		match iter.expect_next_byte()? {
			b'"' => break,
			b'\\' => match iter.expect_next_byte()? {
				b'"' => bytes.push(b'"'),
				b'\\' => bytes.push(b'\\'),
				b'/' => bytes.push(b'/'),
				b'b' => bytes.push(b'\x08'),
				b'f' => bytes.push(b'\x0C'),
				b'n' => bytes.push(b'\n'),
				b'r' => bytes.push(b'\r'),
				b't' => bytes.push(b'\t'),
				b'u' => {
					let mut units = vec![parse_hex4(iter)?];
					if (0xD800..0xDC00).contains(&units[0]) {
						parse_tag(iter, "\\u")?;
						units.push(parse_hex4(iter)?);
					}
					let text =
						String::from_utf16(&units).map_err(|_| iter.format_error("invalid unicode code point"))?;
					bytes.extend_from_slice(text.as_bytes());
				}
				_ => bail!(iter.format_error("invalid escape sequence")),
			},
			c if c < 0x20 => bail!(iter.format_error("unescaped control character in string")),
			c => bytes.push(c),
		}
	}

	String::from_utf8(bytes).map_err(|_| iter.format_error("invalid UTF-8 in string"))
}

/// Parse a JSON number and return its textual representation.
///
/// Accepts an optional minus sign, integer digits, an optional fraction and an optional
/// exponent. Leaves the iterator at the first byte that is not part of the number.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_number_as_string};
/// let mut it = ByteIterator::from_str("-12.3e+4,", true);
/// assert_eq!(parse_number_as_string(&mut it).unwrap(), "-12.3e+4");
/// ```
pub fn parse_number_as_string(iter: &mut ByteIterator) -> Result<String> {
	let mut number = String::with_capacity(16);

	let take_digits = |iter: &mut ByteIterator, number: &mut String| -> bool {
		let mut has_digits = false;
		while let Some(byte @ b'0'..=b'9') = iter.peek() {
			has_digits = true;
			number.push(byte as char);
			iter.advance();
		}
		has_digits
	};

	if let Some(b'-') = iter.peek() {
		number.push('-');
		iter.advance();
	}

	let first_digit = number.len();
	if !take_digits(iter, &mut number) {
		bail!(iter.format_error("expected digits in number"));
	}
	if number[first_digit..].starts_with('0') && number.len() - first_digit > 1 {
		bail!(iter.format_error("leading zeros are not allowed in numbers"));
	}

	if let Some(b'.') = iter.peek() {
		number.push('.');
		iter.advance();
		if !take_digits(iter, &mut number) {
			bail!(iter.format_error("expected digits after decimal point"));
		}
		if let Some(b'.') = iter.peek() {
			bail!(iter.format_error("unexpected '.' in number"));
		}
	}

	if let Some(byte @ (b'e' | b'E')) = iter.peek() {
		number.push(byte as char);
		iter.advance();
		if let Some(sign @ (b'+' | b'-')) = iter.peek() {
			number.push(sign as char);
			iter.advance();
		}
		if !take_digits(iter, &mut number) {
			bail!(iter.format_error("expected digits after exponent"));
		}
	}

	Ok(number)
}

/// Parse a JSON number and convert it to `R`.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_number_as};
/// let mut it = ByteIterator::from_str("42", true);
/// let n: i32 = parse_number_as(&mut it).unwrap();
/// assert_eq!(n, 42);
/// ```
pub fn parse_number_as<R: FromStr>(iter: &mut ByteIterator) -> Result<R> {
	parse_number_as_string(iter)?
		.parse::<R>()
		.map_err(|_| iter.format_error("invalid number"))
}

/// Walk the entries of a JSON object, calling `parse_value` with each key.
///
/// The callback receives the iterator positioned at the start of the value and must
/// consume exactly that value.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_object_entries, parse_quoted_json_string};
/// let mut it = ByteIterator::from_str("{\"k\":\"v\"}", true);
/// let mut got = None;
/// parse_object_entries(&mut it, |k, it| { got = Some((k, parse_quoted_json_string(it)?)); Ok(()) }).unwrap();
/// assert_eq!(got, Some(("k".into(), "v".into())));
/// ```
pub fn parse_object_entries(
	iter: &mut ByteIterator,
	mut parse_value: impl FnMut(String, &mut ByteIterator) -> Result<()>,
) -> Result<()> {
	iter.skip_whitespace();
	if iter.expect_peeked_byte()? != b'{' {
		bail!(iter.format_error("expected '{' while parsing an object"));
	}
	iter.advance();

	iter.skip_whitespace();
	if iter.peek() == Some(b'}') {
		iter.advance();
		return Ok(());
	}

	loop {
		iter.skip_whitespace();
		if iter.expect_peeked_byte()? != b'"' {
			bail!(iter.format_error("parsing object, expected '\"' or '}'"));
		}
		let key = parse_quoted_json_string(iter)?;

		iter.skip_whitespace();
		if iter.expect_peeked_byte()? != b':' {
			bail!(iter.format_error("expected ':'"));
		}
		iter.advance();

		iter.skip_whitespace();
		parse_value(key, iter)?;

		iter.skip_whitespace();
		match iter.expect_peeked_byte()? {
			b',' => iter.advance(),
			b'}' => {
				iter.advance();
				return Ok(());
			}
			_ => bail!(iter.format_error("expected ',' or '}'")),
		}
	}
}

/// Walk the entries of a JSON array, collecting the results of `parse_value`.
///
/// ```
/// # use vectorobj_core::byte_iterator::{ByteIterator, parse_array_entries, parse_number_as};
/// let mut it = ByteIterator::from_str("[1,2,3]", true);
/// let nums: Vec<i32> = parse_array_entries(&mut it, parse_number_as).unwrap();
/// assert_eq!(nums, vec![1,2,3]);
/// ```
pub fn parse_array_entries<R>(
	iter: &mut ByteIterator,
	mut parse_value: impl FnMut(&mut ByteIterator) -> Result<R>,
) -> Result<Vec<R>> {
	iter.skip_whitespace();
	if iter.expect_peeked_byte()? != b'[' {
		bail!(iter.format_error("expected '[' while parsing an array"));
	}
	iter.advance();

	let mut result = Vec::new();

	iter.skip_whitespace();
	if iter.peek() == Some(b']') {
		iter.advance();
		return Ok(result);
	}

	loop {
		iter.skip_whitespace();
		result.push(parse_value(iter)?);

		iter.skip_whitespace();
		match iter.expect_peeked_byte()? {
			b',' => iter.advance(),
			b']' => {
				iter.advance();
				return Ok(result);
			}
			_ => bail!(iter.format_error("parsing array, expected ',' or ']'")),
		}
	}
}

/// Consume one JSON value of any type without keeping it.
///
/// Objects and arrays nested deeper than [`MAX_SKIP_DEPTH`] are rejected.
pub fn skip_json_value(iter: &mut ByteIterator) -> Result<()> {
	skip_nested(iter, 0)
}

fn skip_nested(iter: &mut ByteIterator, depth: usize) -> Result<()> {
	iter.skip_whitespace();
	let byte = iter.expect_peeked_byte()?;
	if matches!(byte, b'{' | b'[') && depth >= MAX_SKIP_DEPTH {
		bail!(iter.format_error("JSON value is nested too deeply"));
	}
	match byte {
		b'{' => parse_object_entries(iter, |_, iter2| skip_nested(iter2, depth + 1)),
		b'[' => parse_array_entries(iter, |iter2| skip_nested(iter2, depth + 1)).map(|_| ()),
		b'"' => parse_quoted_json_string(iter).map(|_| ()),
		b't' => parse_tag(iter, "true"),
		b'f' => parse_tag(iter, "false"),
		b'n' => parse_tag(iter, "null"),
		b'-' | b'0'..=b'9' => parse_number_as_string(iter).map(|_| ()),
		c => bail!(iter.format_error(&format!("unexpected character '{}'", c as char))),
	}
}
