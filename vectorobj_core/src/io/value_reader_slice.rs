//! [`ValueReaderSlice`] reads values from a borrowed byte slice.

use super::ValueReader;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{
	io::{Cursor, Read},
	marker::PhantomData,
};

/// Reads from a byte slice using the byte order `E`.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	#[must_use]
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl<'a> ValueReaderSlice<'a, BigEndian> {
	#[must_use]
	pub fn new_be(slice: &'a [u8]) -> ValueReaderSlice<'a, BigEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl<E: ByteOrder> ValueReader<E> for ValueReaderSlice<'_, E> {
	fn get_reader(&mut self) -> &mut dyn Read {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&self) -> u64 {
		self.cursor.position()
	}
}
