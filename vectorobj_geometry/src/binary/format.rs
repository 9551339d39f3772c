use crate::FeatureKind;

pub const MAGIC: &[u8; 4] = b"VOBJ";
pub const FORMAT_VERSION: u8 = 1;

/// Maximum nesting of list and map values.
pub const MAX_VALUE_DEPTH: usize = 64;

pub const VALUE_NULL: u8 = 0;
pub const VALUE_BOOL: u8 = 1;
pub const VALUE_INT: u8 = 2;
pub const VALUE_UINT: u8 = 3;
pub const VALUE_DOUBLE: u8 = 4;
pub const VALUE_STRING: u8 = 5;
pub const VALUE_LIST: u8 = 6;
pub const VALUE_MAP: u8 = 7;

/// Smallest possible encodings, used to bound counts read from untrusted input.
pub const MIN_COORDINATE_BYTES: u64 = 16;
pub const MIN_RING_BYTES: u64 = 4 + 3 * MIN_COORDINATE_BYTES;
pub const MIN_FEATURE_BYTES: u64 = 1 + 4 + MIN_COORDINATE_BYTES + 4;
pub const MIN_ENTRY_BYTES: u64 = 4 + 1;
pub const MIN_VALUE_BYTES: u64 = 1;

impl FeatureKind {
	#[must_use]
	pub fn as_tag(self) -> u8 {
		match self {
			FeatureKind::Point => 0,
			FeatureKind::Linear => 1,
			FeatureKind::Areal => 2,
		}
	}

	#[must_use]
	pub fn from_tag(tag: u8) -> Option<FeatureKind> {
		match tag {
			0 => Some(FeatureKind::Point),
			1 => Some(FeatureKind::Linear),
			2 => Some(FeatureKind::Areal),
			_ => None,
		}
	}
}
