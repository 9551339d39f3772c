//! Geometries of the three feature kinds and the validation rules every entry point applies.
//!
//! Rings are stored implicitly closed: a trailing coordinate equal to the first one is
//! dropped by [`normalize_ring`] before a ring is validated.

use super::Point2d;
use crate::{VectorError, VectorResult};
use std::fmt::Display;

pub const MIN_LINEAR_POINTS: usize = 2;
pub const MIN_RING_POINTS: usize = 3;

/// The kind of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKind {
	Point,
	Linear,
	Areal,
}

impl Display for FeatureKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			FeatureKind::Point => "point",
			FeatureKind::Linear => "linear",
			FeatureKind::Areal => "areal",
		})
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
	Point(Point2d),
	/// A polyline with at least two coordinates.
	Linear(Vec<Point2d>),
	/// A ring set: the exterior ring first, then holes. Each ring has at least three
	/// coordinates and is stored without its closing coordinate.
	Areal(Vec<Vec<Point2d>>),
}

/// Drops a trailing coordinate that repeats the first one.
pub fn normalize_ring(mut ring: Vec<Point2d>) -> Vec<Point2d> {
	if ring.len() > 1 && ring.first() == ring.last() {
		ring.pop();
	}
	ring
}

impl Geometry {
	#[must_use]
	pub fn new_point(point: Point2d) -> Self {
		Geometry::Point(point)
	}

	pub fn new_linear(points: Vec<Point2d>) -> VectorResult<Self> {
		let geometry = Geometry::Linear(points);
		geometry.validate()?;
		Ok(geometry)
	}

	/// Builds an areal geometry from an exterior ring and optional holes.
	///
	/// Every ring is normalized first; a closed and an open ring with the same vertices
	/// produce the same geometry.
	pub fn new_areal(rings: Vec<Vec<Point2d>>) -> VectorResult<Self> {
		let geometry = Geometry::Areal(rings.into_iter().map(normalize_ring).collect());
		geometry.validate()?;
		Ok(geometry)
	}

	#[must_use]
	pub fn kind(&self) -> FeatureKind {
		match self {
			Geometry::Point(_) => FeatureKind::Point,
			Geometry::Linear(_) => FeatureKind::Linear,
			Geometry::Areal(_) => FeatureKind::Areal,
		}
	}

	/// Checks coordinate counts and that areal rings are stored open.
	pub fn validate(&self) -> VectorResult<()> {
		match self {
			Geometry::Point(_) => Ok(()),
			Geometry::Linear(points) => {
				if points.len() < MIN_LINEAR_POINTS {
					return Err(VectorError::InvalidGeometry(format!(
						"linear needs at least {MIN_LINEAR_POINTS} points, found {}",
						points.len()
					)));
				}
				Ok(())
			}
			Geometry::Areal(rings) => {
				if rings.is_empty() {
					return Err(VectorError::InvalidGeometry("areal needs at least one ring".into()));
				}
				for (index, ring) in rings.iter().enumerate() {
					if ring.len() < MIN_RING_POINTS {
						return Err(VectorError::InvalidGeometry(format!(
							"ring {index} needs at least {MIN_RING_POINTS} distinct points, found {}",
							ring.len()
						)));
					}
					if ring.first() == ring.last() {
						return Err(VectorError::InvalidGeometry(format!(
							"ring {index} repeats its first point at the end"
						)));
					}
				}
				Ok(())
			}
		}
	}

	/// Iterates over all coordinates, ring by ring for areal geometries.
	pub fn points(&self) -> Box<dyn Iterator<Item = &Point2d> + '_> {
		match self {
			Geometry::Point(point) => Box::new(std::iter::once(point)),
			Geometry::Linear(points) => Box::new(points.iter()),
			Geometry::Areal(rings) => Box::new(rings.iter().flatten()),
		}
	}
}
