use std::fmt::Debug;

/// A 2D coordinate pair. Units are up to the caller.
///
/// Equality treats NaN as equal to NaN, so every stored point equals itself.
#[derive(Clone, Copy, Default)]
pub struct Point2d {
	pub x: f64,
	pub y: f64,
}

impl Point2d {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// `a == b`, except that NaN equals NaN.
pub(crate) fn same_number(a: f64, b: f64) -> bool {
	a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for Point2d {
	fn eq(&self, other: &Self) -> bool {
		same_number(self.x, other.x) && same_number(self.y, other.y)
	}
}

impl From<[f64; 2]> for Point2d {
	fn from(value: [f64; 2]) -> Self {
		Point2d::new(value[0], value[1])
	}
}

impl<'a, T> From<&'a [T; 2]> for Point2d
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Point2d::new(value[0].into(), value[1].into())
	}
}

impl From<(f64, f64)> for Point2d {
	fn from(value: (f64, f64)) -> Self {
		Point2d::new(value.0, value.1)
	}
}

impl From<Point2d> for [f64; 2] {
	fn from(value: Point2d) -> Self {
		[value.x, value.y]
	}
}

impl Debug for Point2d {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		[self.x, self.y].fmt(f)
	}
}
