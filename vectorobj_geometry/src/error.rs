use thiserror::Error;

/// Errors returned by the public [`VectorCollection`](crate::VectorCollection) API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VectorError {
	/// Too few coordinates or rings for the feature kind.
	#[error("invalid geometry: {0}")]
	InvalidGeometry(String),

	/// Attributes were requested from a collection without features.
	#[error("the collection contains no features")]
	EmptyCollection,

	/// Malformed or unsupported GeoJSON. `offset` is the byte offset where decoding stopped and
	/// `line` its 1-based line number.
	#[error("failed to parse GeoJSON: {reason}")]
	Parse { reason: String, offset: usize, line: usize },

	/// File access failed or a binary payload is truncated or corrupt.
	#[error("i/o error: {0}")]
	Io(String),
}

impl VectorError {
	/// Flattens an `anyhow` chain into an [`VectorError::Io`].
	pub(crate) fn io(error: &anyhow::Error) -> Self {
		VectorError::Io(format!("{error:#}"))
	}
}

pub type VectorResult<T> = Result<T, VectorError>;
