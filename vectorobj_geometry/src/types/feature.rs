use super::{AttrDictionary, AttrValue, FeatureKind, Geometry};

/// A geometry with its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub geometry: Geometry,
	pub attributes: AttrDictionary,
}

impl Feature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			geometry,
			attributes: AttrDictionary::new(),
		}
	}

	#[must_use]
	pub fn with_attributes(geometry: Geometry, attributes: AttrDictionary) -> Self {
		Self { geometry, attributes }
	}

	#[must_use]
	pub fn kind(&self) -> FeatureKind {
		self.geometry.kind()
	}

	pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
		self.attributes.insert(key, value);
	}
}
