//! Nested `coordinates` arrays, folded bottom-up into positions, lines, rings and polygons.

use crate::Point2d;
use anyhow::{Result, bail};
use vectorobj_core::byte_iterator::{ByteIterator, parse_array_entries, parse_number_as};

/// Arrays deeper than a MultiPolygon's positions are rejected while parsing.
const MAX_ARRAY_DEPTH: usize = 4;

pub enum TemporaryCoordinates {
	Value(f64),
	/// `[]` as the outermost array, valid for every type except `Point`.
	Empty,
	C0(Point2d),
	C1(Vec<Point2d>),
	C2(Vec<Vec<Point2d>>),
	C3(Vec<Vec<Vec<Point2d>>>),
}

impl TemporaryCoordinates {
	fn level(&self) -> u8 {
		match self {
			TemporaryCoordinates::Value(_) => 0,
			TemporaryCoordinates::C0(_) => 1,
			TemporaryCoordinates::C1(_) => 2,
			TemporaryCoordinates::C2(_) => 3,
			TemporaryCoordinates::C3(_) => 4,
			TemporaryCoordinates::Empty => u8::MAX,
		}
	}

	fn describe(&self) -> &'static str {
		match self {
			TemporaryCoordinates::Value(_) => "a number",
			TemporaryCoordinates::Empty => "an empty array",
			TemporaryCoordinates::C0(_) => "a position",
			TemporaryCoordinates::C1(_) => "an array of positions",
			TemporaryCoordinates::C2(_) => "an array of position arrays",
			TemporaryCoordinates::C3(_) => "an array of polygons",
		}
	}

	fn into_value(self) -> Result<f64> {
		match self {
			TemporaryCoordinates::Value(v) => Ok(v),
			other => bail!("expected a number, found {}", other.describe()),
		}
	}

	pub fn into_position(self) -> Result<Point2d> {
		match self {
			TemporaryCoordinates::C0(p) => Ok(p),
			other => bail!("expected a position, found {}", other.describe()),
		}
	}

	pub fn into_positions(self) -> Result<Vec<Point2d>> {
		match self {
			TemporaryCoordinates::C1(v) => Ok(v),
			TemporaryCoordinates::Empty => Ok(Vec::new()),
			other => bail!("expected an array of positions, found {}", other.describe()),
		}
	}

	pub fn into_rings(self) -> Result<Vec<Vec<Point2d>>> {
		match self {
			TemporaryCoordinates::C2(v) => Ok(v),
			TemporaryCoordinates::Empty => Ok(Vec::new()),
			other => bail!("expected an array of position arrays, found {}", other.describe()),
		}
	}

	pub fn into_polygons(self) -> Result<Vec<Vec<Vec<Point2d>>>> {
		match self {
			TemporaryCoordinates::C3(v) => Ok(v),
			TemporaryCoordinates::Empty => Ok(Vec::new()),
			other => bail!("expected an array of polygons, found {}", other.describe()),
		}
	}
}

/// Parses the value of a `coordinates` member.
///
/// Positions must hold 2 or 3 numbers; a third number (altitude) is dropped.
pub fn parse_coordinates(iter: &mut ByteIterator) -> Result<TemporaryCoordinates> {
	recursive(iter, 0)
}

fn recursive(iter: &mut ByteIterator, depth: usize) -> Result<TemporaryCoordinates> {
	use TemporaryCoordinates::*;

	iter.skip_whitespace();
	match iter.expect_peeked_byte()? {
		b'[' => {
			if depth >= MAX_ARRAY_DEPTH {
				bail!(iter.format_error("coordinates are nested too deeply"));
			}
			let list = parse_array_entries(iter, |iter2| recursive(iter2, depth + 1))?;

			let Some(first) = list.first() else {
				return Ok(Empty);
			};
			let level = first.level();
			if list.iter().any(|item| matches!(item, Empty)) {
				bail!(iter.format_error("empty arrays are only allowed as the outermost coordinates array"));
			}
			if list.iter().any(|item| item.level() != level) {
				bail!(iter.format_error("inconsistent nesting in coordinates"));
			}

			Ok(match level {
				0 => {
					if !(2..=3).contains(&list.len()) {
						bail!(iter.format_error(&format!(
							"a position must have 2 or 3 numbers, found {}",
							list.len()
						)));
					}
					let values = list
						.into_iter()
						.map(TemporaryCoordinates::into_value)
						.collect::<Result<Vec<f64>>>()?;
					C0(Point2d::new(values[0], values[1]))
				}
				1 => C1(list.into_iter().map(TemporaryCoordinates::into_position).collect::<Result<_>>()?),
				2 => C2(list.into_iter().map(TemporaryCoordinates::into_positions).collect::<Result<_>>()?),
				3 => C3(list.into_iter().map(TemporaryCoordinates::into_rings).collect::<Result<_>>()?),
				_ => bail!(iter.format_error("coordinates are nested too deeply")),
			})
		}
		b'-' | b'0'..=b'9' => {
			let value: f64 = parse_number_as(iter)?;
			if !value.is_finite() {
				bail!(iter.format_error("coordinate is out of range"));
			}
			Ok(Value(value))
		}
		c => Err(iter.format_error(&format!(
			"expected an array or number while parsing coordinates, but got character '{}'",
			c as char
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn parse(json: &str) -> Result<TemporaryCoordinates> {
		parse_coordinates(&mut ByteIterator::from_str(json, false))
	}

	#[test]
	fn position() -> Result<()> {
		assert_eq!(parse("[1, 2]")?.into_position()?, Point2d::new(1.0, 2.0));
		assert_eq!(parse("[1.5, -2, 300]")?.into_position()?, Point2d::new(1.5, -2.0));
		Ok(())
	}

	#[test]
	fn nested_levels() -> Result<()> {
		assert_eq!(parse("[[0,0],[1,1]]")?.into_positions()?.len(), 2);
		assert_eq!(parse("[[[0,0],[1,0],[0,1]]]")?.into_rings()?, vec![vec![
			Point2d::new(0.0, 0.0),
			Point2d::new(1.0, 0.0),
			Point2d::new(0.0, 1.0)
		]]);
		assert_eq!(parse("[[[[0,0],[1,0],[0,1]]],[[[5,5],[6,5],[5,6]]]]")?.into_polygons()?.len(), 2);
		Ok(())
	}

	#[test]
	fn empty_outer_array() -> Result<()> {
		assert!(parse("[]")?.into_positions()?.is_empty());
		assert!(parse("[]")?.into_position().is_err());
		Ok(())
	}

	#[rstest]
	#[case("[1]", "a position must have 2 or 3 numbers, found 1")]
	#[case("[1,2,3,4]", "a position must have 2 or 3 numbers, found 4")]
	#[case("[[1,2],3]", "inconsistent nesting in coordinates")]
	#[case("[[1,2],[]]", "empty arrays are only allowed as the outermost coordinates array")]
	#[case("[[[[[1,2]]]]]", "coordinates are nested too deeply")]
	#[case("[\"1\",2]", "expected an array or number while parsing coordinates")]
	#[case("[1e999,2]", "coordinate is out of range")]
	fn invalid(#[case] json: &str, #[case] message: &str) {
		let error = parse(json).err().map(|e| e.to_string()).unwrap_or_default();
		assert!(error.starts_with(message), "{error}");
	}

	#[test]
	fn wrong_level_is_reported() -> Result<()> {
		let error = parse("[[0,0],[1,1]]")?.into_rings().unwrap_err();
		assert_eq!(
			error.to_string(),
			"expected an array of position arrays, found an array of positions"
		);
		Ok(())
	}
}
