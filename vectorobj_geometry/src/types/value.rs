use super::{AttrDictionary, point::same_number};
use std::fmt::Display;

/// A single attribute value.
///
/// Integers are split by sign: negative values are stored as `Int`, all others as `UInt`.
/// A `Double` holding NaN equals another NaN `Double`.
#[derive(Clone, Debug)]
pub enum AttrValue {
	Null,
	Bool(bool),
	Int(i64),
	UInt(u64),
	Double(f64),
	String(String),
	List(Vec<AttrValue>),
	Map(AttrDictionary),
}

impl AttrValue {
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			AttrValue::Null => "null",
			AttrValue::Bool(_) => "bool",
			AttrValue::Int(_) => "int",
			AttrValue::UInt(_) => "uint",
			AttrValue::Double(_) => "double",
			AttrValue::String(_) => "string",
			AttrValue::List(_) => "list",
			AttrValue::Map(_) => "map",
		}
	}

	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns numeric values as `f64`.
	#[must_use]
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			AttrValue::Int(v) => Some(*v as f64),
			AttrValue::UInt(v) => Some(*v as f64),
			AttrValue::Double(v) => Some(*v),
			_ => None,
		}
	}
}

impl PartialEq for AttrValue {
	fn eq(&self, other: &Self) -> bool {
		use AttrValue::*;
		match (self, other) {
			(Null, Null) => true,
			(Bool(a), Bool(b)) => a == b,
			(Int(a), Int(b)) => a == b,
			(UInt(a), UInt(b)) => a == b,
			(Double(a), Double(b)) => same_number(*a, *b),
			(String(a), String(b)) => a == b,
			(List(a), List(b)) => a == b,
			(Map(a), Map(b)) => a == b,
			_ => false,
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::String(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::String(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		AttrValue::Bool(value)
	}
}

impl From<i32> for AttrValue {
	fn from(value: i32) -> Self {
		AttrValue::from(i64::from(value))
	}
}

impl From<i64> for AttrValue {
	fn from(value: i64) -> Self {
		if value < 0 {
			AttrValue::Int(value)
		} else {
			AttrValue::UInt(value as u64)
		}
	}
}

impl From<u32> for AttrValue {
	fn from(value: u32) -> Self {
		AttrValue::UInt(u64::from(value))
	}
}

impl From<u64> for AttrValue {
	fn from(value: u64) -> Self {
		AttrValue::UInt(value)
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		AttrValue::Double(value)
	}
}

impl From<Vec<AttrValue>> for AttrValue {
	fn from(value: Vec<AttrValue>) -> Self {
		AttrValue::List(value)
	}
}

impl From<AttrDictionary> for AttrValue {
	fn from(value: AttrDictionary) -> Self {
		AttrValue::Map(value)
	}
}

impl Display for AttrValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AttrValue::Null => f.write_str("null"),
			AttrValue::Bool(v) => write!(f, "{v}"),
			AttrValue::Int(v) => write!(f, "{v}"),
			AttrValue::UInt(v) => write!(f, "{v}"),
			AttrValue::Double(v) => write!(f, "{v}"),
			AttrValue::String(v) => write!(f, "{v:?}"),
			AttrValue::List(list) => {
				f.write_str("[")?;
				for (index, value) in list.iter().enumerate() {
					if index > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{value}")?;
				}
				f.write_str("]")
			}
			AttrValue::Map(map) => write!(f, "{map}"),
		}
	}
}
