//! Streaming GeoJSON decoder.
//!
//! Each object is read member by member into `Members` and converted as soon as its
//! closing brace is reached, so conversion errors point at the object that caused them.

use super::{
	GeoJsonConfig,
	coordinates::{TemporaryCoordinates, parse_coordinates},
};
use crate::{AttrDictionary, AttrValue, Feature, Geometry, Point2d, VectorError, VectorResult};
use anyhow::{Result, bail};
use log::{debug, trace};
use vectorobj_core::byte_iterator::{
	ByteIterator, parse_array_entries, parse_number_as_string, parse_object_entries, parse_quoted_json_string,
	parse_tag, skip_json_value,
};

const MAX_NESTING: usize = 64;

/// Decodes one GeoJSON document into features, in document order.
pub fn parse_geojson(json: &str, config: &GeoJsonConfig) -> VectorResult<Vec<Feature>> {
	let mut iter = ByteIterator::from_str(json, config.debug_snippets);
	let result = parse_geojson_document(&mut iter, config);
	match result {
		Ok(features) => {
			debug!("decoded {} features from {} bytes of GeoJSON", features.len(), json.len());
			Ok(features)
		}
		Err(error) => Err(parse_error(&iter, &error)),
	}
}

pub(crate) fn parse_error(iter: &ByteIterator, error: &anyhow::Error) -> VectorError {
	VectorError::Parse {
		reason: format!("{error:#}"),
		offset: iter.position(),
		line: iter.line(),
	}
}

fn parse_geojson_document(iter: &mut ByteIterator, config: &GeoJsonConfig) -> Result<Vec<Feature>> {
	let parsed = parse_geojson_object(iter, config, 0)?;
	iter.expect_end()?;
	Ok(parsed.into_features())
}

/// What a GeoJSON object turned into.
pub(crate) enum Parsed {
	Geometries(Vec<Geometry>),
	Features(Vec<Feature>),
}

impl Parsed {
	/// Bare geometries become features without attributes.
	pub fn into_features(self) -> Vec<Feature> {
		match self {
			Parsed::Geometries(geometries) => geometries.into_iter().map(Feature::new).collect(),
			Parsed::Features(features) => features,
		}
	}
}

#[derive(Default)]
enum GeometryMember {
	#[default]
	Missing,
	Null,
	Present(Vec<Geometry>),
}

#[derive(Default)]
struct Members {
	coordinates: Option<TemporaryCoordinates>,
	geometry: GeometryMember,
	geometries: Option<Vec<Parsed>>,
	features: Option<Vec<Parsed>>,
	properties: Option<AttrDictionary>,
}

/// Parses any GeoJSON object at the current position.
pub(crate) fn parse_geojson_object(iter: &mut ByteIterator, config: &GeoJsonConfig, depth: usize) -> Result<Parsed> {
	if depth > MAX_NESTING {
		bail!(iter.format_error("GeoJSON objects are nested too deeply"));
	}

	let mut object_type: Option<String> = None;
	let mut members = Members::default();

	parse_object_entries(iter, |key, iter2| {
		match key.as_str() {
			"type" => object_type = Some(parse_quoted_json_string(iter2)?),
			"coordinates" => members.coordinates = Some(parse_coordinates(iter2)?),
			"geometry" => members.geometry = parse_geometry_member(iter2, config, depth)?,
			"geometries" => {
				members.geometries = Some(parse_array_entries(iter2, |iter3| {
					parse_geojson_object(iter3, config, depth + 1)
				})?);
			}
			"features" => {
				members.features = Some(parse_array_entries(iter2, |iter3| {
					parse_geojson_object(iter3, config, depth + 1)
				})?);
			}
			"properties" => members.properties = parse_properties(iter2)?,
			_ => skip_json_value(iter2)?,
		}
		Ok(())
	})?;

	let Some(object_type) = object_type else {
		bail!(iter.format_error("GeoJSON object must have a 'type'"));
	};
	trace!("parsed GeoJSON object of type '{object_type}'");

	build(&object_type, members, config).map_err(|error| iter.format_error(&format!("{error:#}")))
}

fn parse_geometry_member(iter: &mut ByteIterator, config: &GeoJsonConfig, depth: usize) -> Result<GeometryMember> {
	iter.skip_whitespace();
	if iter.expect_peeked_byte()? == b'n' {
		parse_tag(iter, "null")?;
		return Ok(GeometryMember::Null);
	}
	match parse_geojson_object(iter, config, depth + 1)? {
		Parsed::Geometries(geometries) => Ok(GeometryMember::Present(geometries)),
		Parsed::Features(_) => bail!(iter.format_error("a Feature's 'geometry' must be a geometry object")),
	}
}

fn build(object_type: &str, members: Members, config: &GeoJsonConfig) -> Result<Parsed> {
	let coordinates = || {
		members
			.coordinates
			.ok_or_else(|| anyhow::anyhow!("{object_type} must have 'coordinates'"))
	};

	Ok(match object_type {
		"Point" => Parsed::Geometries(vec![Geometry::new_point(coordinates()?.into_position()?)]),
		"LineString" => Parsed::Geometries(vec![Geometry::new_linear(coordinates()?.into_positions()?)?]),
		"Polygon" => Parsed::Geometries(vec![build_polygon(coordinates()?.into_rings()?, config)?]),
		"MultiPoint" => Parsed::Geometries(
			coordinates()?
				.into_positions()?
				.into_iter()
				.map(Geometry::new_point)
				.collect(),
		),
		"MultiLineString" => Parsed::Geometries(
			coordinates()?
				.into_rings()?
				.into_iter()
				.map(Geometry::new_linear)
				.collect::<VectorResult<_>>()?,
		),
		"MultiPolygon" => Parsed::Geometries(
			coordinates()?
				.into_polygons()?
				.into_iter()
				.map(|rings| build_polygon(rings, config))
				.collect::<Result<_>>()?,
		),
		"GeometryCollection" => {
			let Some(children) = members.geometries else {
				bail!("GeometryCollection must have 'geometries'");
			};
			let mut geometries = Vec::new();
			for child in children {
				match child {
					Parsed::Geometries(list) => geometries.extend(list),
					Parsed::Features(_) => bail!("GeometryCollection may only contain geometries"),
				}
			}
			Parsed::Geometries(geometries)
		}
		"Feature" => {
			let attributes = members.properties.unwrap_or_default();
			match members.geometry {
				GeometryMember::Missing => bail!("Feature must have a 'geometry'"),
				GeometryMember::Null => {
					debug!("skipping Feature with null geometry");
					Parsed::Features(Vec::new())
				}
				GeometryMember::Present(geometries) => Parsed::Features(
					geometries
						.into_iter()
						.map(|geometry| Feature::with_attributes(geometry, attributes.clone()))
						.collect(),
				),
			}
		}
		"FeatureCollection" => {
			let Some(children) = members.features else {
				bail!("FeatureCollection must have 'features'");
			};
			let mut features = Vec::new();
			for child in children {
				match child {
					Parsed::Features(list) => features.extend(list),
					Parsed::Geometries(_) => bail!("FeatureCollection may only contain Features"),
				}
			}
			Parsed::Features(features)
		}
		_ => bail!("unknown GeoJSON type '{object_type}'"),
	})
}

fn build_polygon(rings: Vec<Vec<Point2d>>, config: &GeoJsonConfig) -> Result<Geometry> {
	if config.strict_rings {
		for (index, ring) in rings.iter().enumerate() {
			if ring.len() < 4 || ring.first() != ring.last() {
				bail!("polygon ring {index} is not closed");
			}
		}
	}
	Ok(Geometry::new_areal(rings)?)
}

/// `null` yields `None`; anything else must be an object.
fn parse_properties(iter: &mut ByteIterator) -> Result<Option<AttrDictionary>> {
	iter.skip_whitespace();
	match iter.expect_peeked_byte()? {
		b'n' => parse_tag(iter, "null").map(|()| None),
		b'{' => parse_attributes(iter, 0).map(Some),
		_ => Err(iter.format_error("'properties' must be an object or null")),
	}
}

fn parse_attributes(iter: &mut ByteIterator, depth: usize) -> Result<AttrDictionary> {
	let mut attributes = AttrDictionary::new();
	parse_object_entries(iter, |key, iter2| {
		attributes.insert(key, parse_attr_value(iter2, depth + 1)?);
		Ok(())
	})?;
	Ok(attributes)
}

fn parse_attr_value(iter: &mut ByteIterator, depth: usize) -> Result<AttrValue> {
	if depth > MAX_NESTING {
		bail!(iter.format_error("attribute values are nested too deeply"));
	}
	iter.skip_whitespace();
	match iter.expect_peeked_byte()? {
		b'"' => parse_quoted_json_string(iter).map(AttrValue::from),
		b'-' | b'0'..=b'9' => parse_attr_number(iter),
		b't' => parse_tag(iter, "true").map(|()| AttrValue::Bool(true)),
		b'f' => parse_tag(iter, "false").map(|()| AttrValue::Bool(false)),
		b'n' => parse_tag(iter, "null").map(|()| AttrValue::Null),
		b'[' => parse_array_entries(iter, |iter2| parse_attr_value(iter2, depth + 1)).map(AttrValue::List),
		b'{' => parse_attributes(iter, depth).map(AttrValue::Map),
		c => Err(iter.format_error(&format!("unexpected character '{}' in attribute value", c as char))),
	}
}

/// Numbers with a fraction or exponent become `Double`; integers keep their sign class
/// and fall back to `Double` when they overflow 64 bits.
fn parse_attr_number(iter: &mut ByteIterator) -> Result<AttrValue> {
	let number = parse_number_as_string(iter)?;
	let as_double = |number: &str| {
		number
			.parse::<f64>()
			.map(AttrValue::Double)
			.map_err(|_| iter.format_error("invalid number"))
	};

	if number.contains(['.', 'e', 'E']) {
		as_double(&number)
	} else if number.starts_with('-') {
		number.parse::<i64>().map(AttrValue::from).or_else(|_| as_double(&number))
	} else {
		number.parse::<u64>().map(AttrValue::UInt).or_else(|_| as_double(&number))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FeatureKind;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use vectorobj_core::byte_iterator::MAX_SKIP_DEPTH;

	fn parse(json: &str) -> VectorResult<Vec<Feature>> {
		parse_geojson(json, &GeoJsonConfig::default())
	}

	fn kinds(features: &[Feature]) -> Vec<FeatureKind> {
		features.iter().map(Feature::kind).collect()
	}

	#[test]
	fn bare_geometries() -> VectorResult<()> {
		let features = parse(r#"{"type":"Point","coordinates":[1,2]}"#)?;
		assert_eq!(features, vec![Feature::new(Geometry::Point(Point2d::new(1.0, 2.0)))]);

		let features = parse(r#"{"coordinates":[[0,0],[1,1],[2,0]],"type":"LineString"}"#)?;
		assert_eq!(kinds(&features), vec![FeatureKind::Linear]);
		Ok(())
	}

	#[test]
	fn feature_collection_keeps_order_and_properties() -> VectorResult<()> {
		let json = r#"{
			"type": "FeatureCollection",
			"features": [
				{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {"name": "a", "rank": 1}},
				{"type": "Feature", "properties": null, "geometry": {"type": "LineString", "coordinates": [[0, 0], [3, 4]]}},
				{"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [4, 0], [0, 4], [0, 0]]]}}
			]
		}"#;
		let features = parse(json)?;
		assert_eq!(kinds(&features), vec![FeatureKind::Point, FeatureKind::Linear, FeatureKind::Areal]);
		assert_eq!(
			features[0].attributes,
			AttrDictionary::from(vec![("name", AttrValue::from("a")), ("rank", AttrValue::UInt(1))])
		);
		assert!(features[1].attributes.is_empty());
		assert!(features[2].attributes.is_empty());
		assert_eq!(
			features[2].geometry,
			Geometry::Areal(vec![vec![
				Point2d::new(0.0, 0.0),
				Point2d::new(4.0, 0.0),
				Point2d::new(0.0, 4.0)
			]])
		);
		Ok(())
	}

	#[test]
	fn multi_geometries_are_split() -> VectorResult<()> {
		let json = r#"{"type":"Feature","properties":{"id":7},"geometry":{"type":"MultiPoint","coordinates":[[0,0],[1,1],[2,2]]}}"#;
		let features = parse(json)?;
		assert_eq!(features.len(), 3);
		for feature in &features {
			assert_eq!(feature.attributes.get("id"), Some(&AttrValue::UInt(7)));
		}

		let json = r#"{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[0,1]]],[[[5,5],[6,5],[5,6]],[[5.2,5.2],[5.4,5.2],[5.2,5.4]]]]}"#;
		let features = parse(json)?;
		assert_eq!(kinds(&features), vec![FeatureKind::Areal, FeatureKind::Areal]);
		let Geometry::Areal(rings) = &features[1].geometry else {
			panic!("expected an areal geometry");
		};
		assert_eq!(rings.len(), 2);

		let json = r#"{"type":"MultiLineString","coordinates":[[[0,0],[1,1]],[[2,2],[3,3]]]}"#;
		assert_eq!(kinds(&parse(json)?), vec![FeatureKind::Linear, FeatureKind::Linear]);
		Ok(())
	}

	#[test]
	fn geometry_collection_is_flattened() -> VectorResult<()> {
		let json = r#"{"type":"GeometryCollection","geometries":[
			{"type":"Point","coordinates":[0,0]},
			{"type":"GeometryCollection","geometries":[{"type":"LineString","coordinates":[[0,0],[1,1]]}]}
		]}"#;
		assert_eq!(kinds(&parse(json)?), vec![FeatureKind::Point, FeatureKind::Linear]);
		Ok(())
	}

	#[test]
	fn null_geometry_contributes_nothing() -> VectorResult<()> {
		let json = r#"{"type":"FeatureCollection","features":[
			{"type":"Feature","geometry":null,"properties":{"a":1}},
			{"type":"Feature","geometry":{"type":"Point","coordinates":[1,1]},"properties":{"b":2}}
		]}"#;
		let features = parse(json)?;
		assert_eq!(features.len(), 1);
		assert!(features[0].attributes.contains_key("b"));
		Ok(())
	}

	#[test]
	fn attribute_types() -> VectorResult<()> {
		let json = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{
			"s":"text","u":42,"i":-42,"d":1.5,"e":2e3,"b":false,"n":null,
			"l":[1,"x",[true]],"m":{"k":"v"},"big":123456789012345678901234567890
		}}"#;
		let features = parse(json)?;
		let attributes = &features[0].attributes;
		assert_eq!(attributes.get("s"), Some(&AttrValue::from("text")));
		assert_eq!(attributes.get("u"), Some(&AttrValue::UInt(42)));
		assert_eq!(attributes.get("i"), Some(&AttrValue::Int(-42)));
		assert_eq!(attributes.get("d"), Some(&AttrValue::Double(1.5)));
		assert_eq!(attributes.get("e"), Some(&AttrValue::Double(2000.0)));
		assert_eq!(attributes.get("b"), Some(&AttrValue::Bool(false)));
		assert_eq!(attributes.get("n"), Some(&AttrValue::Null));
		assert_eq!(
			attributes.get("l"),
			Some(&AttrValue::List(vec![
				AttrValue::UInt(1),
				AttrValue::from("x"),
				AttrValue::List(vec![AttrValue::Bool(true)])
			]))
		);
		assert_eq!(
			attributes.get("m"),
			Some(&AttrValue::Map(AttrDictionary::from(vec![("k", AttrValue::from("v"))])))
		);
		assert!(matches!(attributes.get("big"), Some(AttrValue::Double(_))));
		let keys: Vec<&String> = attributes.keys().collect();
		assert_eq!(keys, vec!["s", "u", "i", "d", "e", "b", "n", "l", "m", "big"]);
		Ok(())
	}

	#[test]
	fn unknown_members_are_skipped() -> VectorResult<()> {
		let json = r#"{"type":"Feature","id":"x1","bbox":[0,0,1,1],"extra":{"deep":[null,{"a":true}]},
			"geometry":{"type":"Point","coordinates":[0.5,0.5],"crs":null},"properties":{}}"#;
		assert_eq!(parse(json)?.len(), 1);
		Ok(())
	}

	#[rstest]
	#[case(r#"{"type":"Point","coordinates":[1]}"#, "a position must have 2 or 3 numbers")]
	#[case(r#"{"type":"Point","coordinates":[[1,2]]}"#, "expected a position")]
	#[case(r#"{"type":"LineString","coordinates":[[1,2]]}"#, "invalid geometry: linear needs at least 2 points")]
	#[case(r#"{"type":"Polygon","coordinates":[[[0,0],[1,1],[0,0]]]}"#, "invalid geometry: ring 0")]
	#[case(r#"{"type":"Circle","coordinates":[1,2]}"#, "unknown GeoJSON type 'Circle'")]
	#[case(r#"{"coordinates":[1,2]}"#, "GeoJSON object must have a 'type'")]
	#[case(r#"{"type":"Point"}"#, "Point must have 'coordinates'")]
	#[case(r#"{"type":"Feature","properties":{}}"#, "Feature must have a 'geometry'")]
	#[case(r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":[]}"#, "'properties' must be an object or null")]
	#[case(r#"{"type":"FeatureCollection","features":[{"type":"Point","coordinates":[0,0]}]}"#, "FeatureCollection may only contain Features")]
	#[case(r#"{"type":"Point","coordinates":[1,2]} x"#, "unexpected trailing characters")]
	#[case(r#"{"type":"Point","coordinates":[1,2]"#, "unexpected end")]
	#[case("", "unexpected end")]
	#[case(r#"{"type":"Point","coordinates":[01,2]}"#, "leading zeros are not allowed")]
	#[case("{\"type\":\"Feature\",\"properties\":{\"a\":\"x\ty\"},\"geometry\":null}", "unescaped control character")]
	fn invalid_documents(#[case] json: &str, #[case] message: &str) {
		let Err(VectorError::Parse { reason, .. }) = parse(json) else {
			panic!("expected a parse error for {json}");
		};
		assert!(reason.starts_with(message), "{reason}");
	}

	#[test]
	fn deeply_nested_foreign_member_is_a_parse_error() {
		let depth = 200_000;
		let json = format!(
			r#"{{"type":"Point","coordinates":[1,2],"extra":{}{}}}"#,
			"[".repeat(depth),
			"]".repeat(depth)
		);
		let Err(VectorError::Parse { reason, offset, .. }) = parse(&json) else {
			panic!("expected a parse error");
		};
		assert!(reason.starts_with("JSON value is nested too deeply"), "{reason}");
		assert_eq!(offset, json.find("[[").unwrap_or_default() + MAX_SKIP_DEPTH);
	}

	#[test]
	fn parse_error_reports_position() {
		let json = "{\n\"type\": \"Point\",\n\"coordinates\": [1, tru]\n}";
		let Err(VectorError::Parse { offset, line, .. }) = parse(json) else {
			panic!("expected a parse error");
		};
		assert_eq!(line, 3);
		assert_eq!(&json[offset..offset + 3], "tru");
	}

	#[test]
	fn debug_snippets_can_be_disabled() {
		let config = GeoJsonConfig {
			debug_snippets: false,
			..GeoJsonConfig::default()
		};
		let Err(VectorError::Parse { reason, .. }) = parse_geojson(r#"{"type":"Point","coordinates":[1]}"#, &config)
		else {
			panic!("expected a parse error");
		};
		assert!(!reason.contains("<EOF>"), "{reason}");
	}

	#[test]
	fn strict_rings() -> VectorResult<()> {
		let open = r#"{"type":"Polygon","coordinates":[[[0,0],[4,0],[0,4]]]}"#;
		let closed = r#"{"type":"Polygon","coordinates":[[[0,0],[4,0],[0,4],[0,0]]]}"#;
		let strict = GeoJsonConfig {
			strict_rings: true,
			..GeoJsonConfig::default()
		};

		assert_eq!(parse(open)?, parse(closed)?);
		assert_eq!(parse_geojson(closed, &strict)?, parse(closed)?);
		assert!(matches!(parse_geojson(open, &strict), Err(VectorError::Parse { .. })));
		Ok(())
	}
}
