//! [`Blob`] is an owned byte buffer used as the in-memory form of encoded vector data.
//!
//! ```rust
//! use vectorobj_core::Blob;
//!
//! let blob = Blob::from(&[0x56, 0x4f, 0x42, 0x4a]);
//! assert_eq!(blob.len(), 4);
//! assert_eq!(blob.as_hex(), "56 4f 42 4a");
//! ```

use anyhow::{Context, Result};
use std::fmt::Debug;
use std::path::Path;

/// A thin wrapper around [`Vec<u8>`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the bytes as lowercase hex pairs separated by spaces.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Writes the bytes to `path`, replacing any existing file.
	pub fn save_to_file(&self, path: &Path) -> Result<()> {
		std::fs::write(path, &self.0).with_context(|| format!("failed to write file {path:?}"))
	}

	/// Reads the whole file at `path`.
	pub fn load_from_file(path: &Path) -> Result<Self> {
		let bytes = std::fs::read(path).with_context(|| format!("failed to read file {path:?}"))?;
		Ok(Blob(bytes))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(value: &[u8; N]) -> Self {
		Blob(value.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		const PREVIEW: usize = 16;
		if self.0.len() <= PREVIEW {
			write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
		} else {
			let head = Blob::from(&self.0[..PREVIEW]);
			write!(f, "Blob({}): {} ...", self.0.len(), head.as_hex())
		}
	}
}
