use super::AttrValue;
use indexmap::{IndexMap, map};
use std::fmt::{Debug, Display};

/// String keys mapped to [`AttrValue`]s, kept in insertion order.
#[derive(Clone, Default, PartialEq)]
pub struct AttrDictionary {
	entries: IndexMap<String, AttrValue>,
}

impl AttrDictionary {
	#[must_use]
	pub fn new() -> AttrDictionary {
		AttrDictionary {
			entries: IndexMap::new(),
		}
	}

	/// Inserts or replaces a value. A replaced key keeps its original position.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
		self.entries.insert(key.into(), value.into())
	}

	/// Removes a key and shifts later entries forward, preserving their order.
	pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
		self.entries.shift_remove(key)
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&AttrValue> {
		self.entries.get(key)
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> map::Iter<'_, String, AttrValue> {
		self.entries.iter()
	}

	pub fn keys(&self) -> map::Keys<'_, String, AttrValue> {
		self.entries.keys()
	}
}

impl IntoIterator for AttrDictionary {
	type Item = (String, AttrValue);
	type IntoIter = map::IntoIter<String, AttrValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<'a> IntoIterator for &'a AttrDictionary {
	type Item = (&'a String, &'a AttrValue);
	type IntoIter = map::Iter<'a, String, AttrValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl FromIterator<(String, AttrValue)> for AttrDictionary {
	fn from_iter<T: IntoIterator<Item = (String, AttrValue)>>(iter: T) -> Self {
		AttrDictionary {
			entries: IndexMap::from_iter(iter),
		}
	}
}

impl From<Vec<(&str, AttrValue)>> for AttrDictionary {
	fn from(value: Vec<(&str, AttrValue)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl Debug for AttrDictionary {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.entries.iter()).finish()
	}
}

impl Display for AttrDictionary {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("{")?;
		for (index, (key, value)) in self.entries.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{key:?}: {value}")?;
		}
		f.write_str("}")
	}
}
