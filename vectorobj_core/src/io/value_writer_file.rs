//! [`ValueWriterFile`] writes values through a buffered file handle.
//!
//! Call [`ValueWriterFile::finish`] once done: it flushes the buffer and surfaces any
//! write error that dropping the writer would swallow.

use super::ValueWriter;
use anyhow::{Context, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::marker::PhantomData;

/// Writes into a file using the byte order `E`.
pub struct ValueWriterFile<E: ByteOrder> {
	_phantom: PhantomData<E>,
	writer: BufWriter<File>,
}

impl<E: ByteOrder> ValueWriterFile<E> {
	#[must_use]
	pub fn new(file: File) -> ValueWriterFile<E> {
		ValueWriterFile {
			_phantom: PhantomData,
			writer: BufWriter::new(file),
		}
	}

	/// Flushes buffered bytes to the file.
	pub fn finish(mut self) -> Result<()> {
		self.writer.flush().context("failed to flush file")
	}
}

impl ValueWriterFile<LittleEndian> {
	#[must_use]
	pub fn new_le(file: File) -> ValueWriterFile<LittleEndian> {
		ValueWriterFile::new(file)
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterFile<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.writer
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.writer.stream_position()?)
	}
}
