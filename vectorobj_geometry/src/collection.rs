//! [`VectorCollection`], an ordered and exclusively owned list of features.
//!
//! Every entry point validates geometries, so a collection only ever holds well formed
//! features. Failed mutations leave the collection unchanged.

use crate::{
	AttrDictionary, Feature, FeatureKind, GeoJsonConfig, Geometry, Point2d, VectorError, VectorResult, binary,
	geojson::{parse_geojson, parse_geojson_assembly},
};
use indexmap::IndexMap;
use std::{path::Path, slice};
use vectorobj_core::Blob;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorCollection {
	features: Vec<Feature>,
}

/// Number of features per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
	pub point: usize,
	pub linear: usize,
	pub areal: usize,
}

impl VectorCollection {
	#[must_use]
	pub fn new() -> Self {
		Self { features: Vec::new() }
	}

	/// Builds a collection from features, validating each one.
	pub fn from_features(features: Vec<Feature>) -> VectorResult<Self> {
		for feature in &features {
			feature.geometry.validate()?;
		}
		Ok(Self { features })
	}

	pub fn add_point(&mut self, point: Point2d) {
		self.features.push(Feature::new(Geometry::new_point(point)));
	}

	/// Appends a polyline. Fails with [`VectorError::InvalidGeometry`] for fewer than 2 points.
	pub fn add_linear(&mut self, points: &[Point2d]) -> VectorResult<()> {
		let geometry = Geometry::new_linear(points.to_vec())?;
		self.features.push(Feature::new(geometry));
		Ok(())
	}

	/// Appends a polygon without holes. The ring may be given open or closed and needs at
	/// least 3 distinct points.
	pub fn add_areal(&mut self, points: &[Point2d]) -> VectorResult<()> {
		self.add_areal_with_holes(points, &[])
	}

	pub fn add_areal_with_holes(&mut self, exterior: &[Point2d], holes: &[Vec<Point2d>]) -> VectorResult<()> {
		let mut rings = Vec::with_capacity(holes.len() + 1);
		rings.push(exterior.to_vec());
		rings.extend(holes.iter().cloned());
		let geometry = Geometry::new_areal(rings)?;
		self.features.push(Feature::new(geometry));
		Ok(())
	}

	pub fn add_feature(&mut self, feature: Feature) -> VectorResult<()> {
		feature.geometry.validate()?;
		self.features.push(feature);
		Ok(())
	}

	/// Moves all features of `other` to the end of this collection.
	pub fn append(&mut self, other: &mut VectorCollection) {
		self.features.append(&mut other.features);
	}

	/// Attributes of the first feature. Later features are not consulted.
	pub fn get_attributes(&self) -> VectorResult<&AttrDictionary> {
		self
			.features
			.first()
			.map(|feature| &feature.attributes)
			.ok_or(VectorError::EmptyCollection)
	}

	pub fn get_attributes_mut(&mut self) -> VectorResult<&mut AttrDictionary> {
		self
			.features
			.first_mut()
			.map(|feature| &mut feature.attributes)
			.ok_or(VectorError::EmptyCollection)
	}

	pub fn iter(&self) -> slice::Iter<'_, Feature> {
		self.features.iter()
	}

	/// Yields every feature as its own single-feature collection.
	pub fn split(&self) -> impl Iterator<Item = VectorCollection> + '_ {
		self.features.iter().map(|feature| VectorCollection {
			features: vec![feature.clone()],
		})
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Feature> {
		self.features.get(index)
	}

	#[must_use]
	pub fn features(&self) -> &[Feature] {
		&self.features
	}

	#[must_use]
	pub fn into_features(self) -> Vec<Feature> {
		self.features
	}

	/// `[x_min, y_min, x_max, y_max]` over all coordinates, or `None` when empty.
	#[must_use]
	pub fn bounds(&self) -> Option<[f64; 4]> {
		self
			.features
			.iter()
			.flat_map(|feature| feature.geometry.points())
			.fold(None, |bounds, p| match bounds {
				None => Some([p.x, p.y, p.x, p.y]),
				Some([x0, y0, x1, y1]) => Some([x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)]),
			})
	}

	#[must_use]
	pub fn count_by_kind(&self) -> KindCounts {
		let mut counts = KindCounts::default();
		for feature in &self.features {
			match feature.kind() {
				FeatureKind::Point => counts.point += 1,
				FeatureKind::Linear => counts.linear += 1,
				FeatureKind::Areal => counts.areal += 1,
			}
		}
		counts
	}

	/// Decodes a GeoJSON document with the default [`GeoJsonConfig`].
	pub fn from_geojson(json: &str) -> VectorResult<Self> {
		Self::from_geojson_with(json, &GeoJsonConfig::default())
	}

	pub fn from_geojson_with(json: &str, config: &GeoJsonConfig) -> VectorResult<Self> {
		Ok(Self {
			features: parse_geojson(json, config)?,
		})
	}

	/// Decodes a GeoJSON document and appends its features. Nothing is appended on failure.
	pub fn append_geojson(&mut self, json: &str) -> VectorResult<()> {
		let features = parse_geojson(json, &GeoJsonConfig::default())?;
		self.features.extend(features);
		Ok(())
	}

	/// Decodes a named assembly; see [`crate::geojson::parse_geojson_assembly`].
	pub fn from_geojson_assembly(json: &str) -> VectorResult<IndexMap<String, Self>> {
		Self::from_geojson_assembly_with(json, &GeoJsonConfig::default())
	}

	pub fn from_geojson_assembly_with(json: &str, config: &GeoJsonConfig) -> VectorResult<IndexMap<String, Self>> {
		Ok(
			parse_geojson_assembly(json, config)?
				.into_iter()
				.map(|(name, features)| (name, Self { features }))
				.collect(),
		)
	}

	pub fn write_to_file(&self, path: &Path) -> VectorResult<()> {
		binary::write_collection_file(self, path).map_err(|error| VectorError::io(&error))
	}

	pub fn read_from_file(path: &Path) -> VectorResult<Self> {
		binary::read_collection_file(path).map_err(|error| VectorError::io(&error))
	}

	pub fn to_blob(&self) -> VectorResult<Blob> {
		binary::encode_collection(self).map_err(|error| VectorError::io(&error))
	}

	pub fn from_blob(blob: &Blob) -> VectorResult<Self> {
		Self::from_slice(blob.as_slice())
	}

	pub fn from_slice(bytes: &[u8]) -> VectorResult<Self> {
		binary::decode_collection(bytes).map_err(|error| VectorError::io(&error))
	}
}

impl<'a> IntoIterator for &'a VectorCollection {
	type Item = &'a Feature;
	type IntoIter = slice::Iter<'a, Feature>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.iter()
	}
}

impl IntoIterator for VectorCollection {
	type Item = Feature;
	type IntoIter = std::vec::IntoIter<Feature>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.into_iter()
	}
}

impl Extend<VectorCollection> for VectorCollection {
	fn extend<T: IntoIterator<Item = VectorCollection>>(&mut self, iter: T) {
		for collection in iter {
			self.features.extend(collection.features);
		}
	}
}

impl KindCounts {
	#[must_use]
	pub fn total(&self) -> usize {
		self.point + self.linear + self.areal
	}
}
