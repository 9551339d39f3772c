use super::format::*;
use crate::{AttrDictionary, AttrValue, Feature, FeatureKind, Geometry, Point2d, VectorCollection};
use anyhow::{Context, Result, bail, ensure};
use byteorder::LittleEndian;
use log::{debug, trace};
use std::path::Path;
use vectorobj_core::{
	Blob,
	io::{ValueReader, ValueReaderSlice},
};

/// Decodes a complete collection from bytes. Trailing bytes are an error.
pub fn decode_collection(bytes: &[u8]) -> Result<VectorCollection> {
	let mut reader = ValueReaderSlice::new_le(bytes);
	let collection = read_collection(&mut reader).context("failed to decode vector collection")?;
	debug!("decoded {} features from {} bytes", collection.len(), bytes.len());
	Ok(collection)
}

pub fn read_collection_file(path: &Path) -> Result<VectorCollection> {
	let blob = Blob::load_from_file(path)?;
	decode_collection(blob.as_slice()).with_context(|| format!("failed to read {path:?}"))
}

pub fn read_collection<R: ValueReader<LittleEndian>>(reader: &mut R) -> Result<VectorCollection> {
	let mut magic = [0u8; 4];
	for byte in &mut magic {
		*byte = reader.read_u8()?;
	}
	ensure!(&magic == MAGIC, "invalid magic bytes {magic:02x?}, expected \"VOBJ\"");

	let version = reader.read_u8()?;
	ensure!(version == FORMAT_VERSION, "unsupported format version {version}");

	let count = reader.read_count(MIN_FEATURE_BYTES)?;
	let mut collection = VectorCollection::new();
	for index in 0..count {
		let feature = read_feature(reader).with_context(|| format!("failed to read feature {index}"))?;
		collection.add_feature(feature)?;
	}

	if reader.has_remaining() {
		bail!("{} trailing bytes after the last feature", reader.remaining());
	}
	Ok(collection)
}

fn read_feature<R: ValueReader<LittleEndian>>(reader: &mut R) -> Result<Feature> {
	let offset = reader.position();
	let tag = reader.read_u8()?;
	let Some(kind) = FeatureKind::from_tag(tag) else {
		bail!("unknown feature kind {tag} at offset {offset}");
	};
	trace!("reading {kind} feature at offset {offset}");

	let geometry = match kind {
		FeatureKind::Point => {
			let count = reader.read_u32()?;
			ensure!(count == 1, "point feature must have exactly 1 coordinate, found {count}");
			Geometry::Point(read_point(reader)?)
		}
		FeatureKind::Linear => Geometry::Linear(read_points(reader)?),
		FeatureKind::Areal => {
			let ring_count = reader.read_count(MIN_RING_BYTES)?;
			let mut rings = Vec::with_capacity(ring_count);
			for _ in 0..ring_count {
				rings.push(read_points(reader)?);
			}
			Geometry::Areal(rings)
		}
	};
	geometry.validate()?;

	let attributes = read_attributes(reader, 0)?;
	Ok(Feature::with_attributes(geometry, attributes))
}

fn read_point<R: ValueReader<LittleEndian>>(reader: &mut R) -> Result<Point2d> {
	Ok(Point2d::new(reader.read_f64()?, reader.read_f64()?))
}

fn read_points<R: ValueReader<LittleEndian>>(reader: &mut R) -> Result<Vec<Point2d>> {
	let count = reader.read_count(MIN_COORDINATE_BYTES)?;
	let mut points = Vec::with_capacity(count);
	for _ in 0..count {
		points.push(read_point(reader)?);
	}
	Ok(points)
}

fn read_attributes<R: ValueReader<LittleEndian>>(reader: &mut R, depth: usize) -> Result<AttrDictionary> {
	let count = reader.read_count(MIN_ENTRY_BYTES)?;
	let mut attributes = AttrDictionary::new();
	for _ in 0..count {
		let key = reader.read_len_string().context("failed to read attribute key")?;
		let value = read_value(reader, depth).with_context(|| format!("failed to read attribute '{key}'"))?;
		if attributes.insert(key.clone(), value).is_some() {
			bail!("duplicate attribute key '{key}'");
		}
	}
	Ok(attributes)
}

fn read_value<R: ValueReader<LittleEndian>>(reader: &mut R, depth: usize) -> Result<AttrValue> {
	ensure!(depth < MAX_VALUE_DEPTH, "attribute values are nested too deeply");

	let offset = reader.position();
	Ok(match reader.read_u8()? {
		VALUE_NULL => AttrValue::Null,
		VALUE_BOOL => match reader.read_u8()? {
			0 => AttrValue::Bool(false),
			1 => AttrValue::Bool(true),
			b => bail!("invalid bool value {b} at offset {}", offset + 1),
		},
		VALUE_INT => AttrValue::Int(reader.read_i64()?),
		VALUE_UINT => AttrValue::UInt(reader.read_u64()?),
		VALUE_DOUBLE => AttrValue::Double(reader.read_f64()?),
		VALUE_STRING => AttrValue::String(reader.read_len_string()?),
		VALUE_LIST => {
			let count = reader.read_count(MIN_VALUE_BYTES)?;
			let mut list = Vec::with_capacity(count);
			for _ in 0..count {
				list.push(read_value(reader, depth + 1)?);
			}
			AttrValue::List(list)
		}
		VALUE_MAP => AttrValue::Map(read_attributes(reader, depth + 1)?),
		tag => bail!("unknown value tag {tag} at offset {offset}"),
	})
}

#[cfg(test)]
mod tests {
	use super::super::encode_collection;
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn example() -> VectorCollection {
		let mut collection = VectorCollection::new();
		collection.add_point(Point2d::new(13.4, 52.5));
		let attributes = collection.get_attributes_mut().unwrap();
		attributes.insert("name", "Berlin");
		attributes.insert("rank", -1);
		attributes.insert("population", 3_664_088u32);
		attributes.insert("area", 891.8);
		attributes.insert("capital", true);
		attributes.insert("note", AttrValue::Null);
		attributes.insert("tags", AttrValue::List(vec![AttrValue::from("a"), AttrValue::from(2)]));
		attributes.insert("meta", AttrDictionary::from(vec![("source", AttrValue::from("osm"))]));

		collection
			.add_linear(&[Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0), Point2d::new(2.0, 0.0)])
			.unwrap();
		collection
			.add_areal_with_holes(
				&[Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0), Point2d::new(0.0, 10.0)],
				&[vec![Point2d::new(1.0, 1.0), Point2d::new(2.0, 1.0), Point2d::new(1.0, 2.0)]],
			)
			.unwrap();
		collection
	}

	fn encoded() -> Vec<u8> {
		encode_collection(&example()).unwrap().into_vec()
	}

	#[test]
	fn round_trip_keeps_everything() -> Result<()> {
		let collection = example();
		let decoded = decode_collection(&encoded())?;
		assert_eq!(decoded, collection);

		let keys: Vec<&String> = decoded.get_attributes()?.keys().collect();
		assert_eq!(
			keys,
			vec!["name", "rank", "population", "area", "capital", "note", "tags", "meta"]
		);
		Ok(())
	}

	#[test]
	fn every_truncation_fails() {
		let bytes = encoded();
		for length in 0..bytes.len() {
			assert!(decode_collection(&bytes[..length]).is_err(), "length {length}");
		}
	}

	#[test]
	fn trailing_bytes_fail() {
		let mut bytes = encoded();
		bytes.push(0);
		let error = decode_collection(&bytes).unwrap_err();
		assert_eq!(
			format!("{error:#}"),
			"failed to decode vector collection: 1 trailing bytes after the last feature"
		);
	}

	#[rstest]
	#[case(0, b'X', "invalid magic bytes")]
	#[case(4, 2, "unsupported format version 2")]
	#[case(9, 7, "failed to read feature 0: unknown feature kind 7 at offset 9")]
	fn corrupt_header(#[case] index: usize, #[case] byte: u8, #[case] message: &str) {
		let mut bytes = encoded();
		bytes[index] = byte;
		let error = format!("{:#}", decode_collection(&bytes).unwrap_err());
		assert!(
			error.starts_with(&format!("failed to decode vector collection: {message}")),
			"{error}"
		);
	}

	#[test]
	fn unknown_value_tag_fails() -> Result<()> {
		let mut collection = VectorCollection::new();
		collection.add_point(Point2d::new(0.0, 0.0));
		collection.get_attributes_mut()?.insert("k", AttrValue::Null);
		let mut bytes = encode_collection(&collection)?.into_vec();
		let last = bytes.len() - 1;
		bytes[last] = 9;

		let error = format!("{:#}", decode_collection(&bytes).unwrap_err());
		assert!(error.contains("unknown value tag 9"), "{error}");
		Ok(())
	}

	#[test]
	fn stored_closing_point_fails() -> Result<()> {
		let mut bytes = b"VOBJ\x01".to_vec();
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.push(FeatureKind::Areal.as_tag());
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.extend_from_slice(&4u32.to_le_bytes());
		for [x, y] in [[0.0f64, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]] {
			bytes.extend_from_slice(&x.to_le_bytes());
			bytes.extend_from_slice(&y.to_le_bytes());
		}
		bytes.extend_from_slice(&0u32.to_le_bytes());

		let error = format!("{:#}", decode_collection(&bytes).unwrap_err());
		assert!(error.contains("ring 0 repeats its first point at the end"), "{error}");
		Ok(())
	}

	#[test]
	fn huge_counts_are_rejected_before_allocating() {
		let mut bytes = b"VOBJ\x01".to_vec();
		bytes.extend_from_slice(&u32::MAX.to_le_bytes());
		let error = format!("{:#}", decode_collection(&bytes).unwrap_err());
		assert!(error.contains("exceeds the remaining 0 bytes"), "{error}");
	}

	#[test]
	fn read_missing_file_fails() {
		let error = read_collection_file(Path::new("/does/not/exist.vobj")).unwrap_err();
		assert!(error.to_string().starts_with("failed to read file"));
	}

	#[test]
	fn deepest_writable_value_reads_back() -> Result<()> {
		let value = (1..MAX_VALUE_DEPTH).fold(AttrValue::from(1), |value, _| AttrValue::List(vec![value]));
		let mut collection = VectorCollection::new();
		collection.add_point(Point2d::new(0.0, 0.0));
		collection.get_attributes_mut()?.insert("deep", value);

		assert_eq!(decode_collection(&encode_collection(&collection)?.into_vec())?, collection);
		Ok(())
	}

	#[test]
	fn too_deep_values_fail() {
		let mut bytes = b"VOBJ\x01".to_vec();
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.push(FeatureKind::Point.as_tag());
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.extend_from_slice(&[0u8; 16]);
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.extend_from_slice(&1u32.to_le_bytes());
		bytes.push(b'd');
		for _ in 0..MAX_VALUE_DEPTH {
			bytes.push(VALUE_LIST);
			bytes.extend_from_slice(&1u32.to_le_bytes());
		}
		bytes.push(VALUE_NULL);

		let error = format!("{:#}", decode_collection(&bytes).unwrap_err());
		assert!(error.contains("attribute values are nested too deeply"), "{error}");
	}

	#[test]
	fn non_finite_values_read_back_equal() -> Result<()> {
		let mut collection = VectorCollection::new();
		collection.add_point(Point2d::new(f64::NAN, f64::INFINITY));
		collection.add_linear(&[Point2d::new(f64::NEG_INFINITY, 0.0), Point2d::new(-0.0, f64::NAN)])?;
		collection.get_attributes_mut()?.insert("ratio", f64::NAN);

		let decoded = decode_collection(&encode_collection(&collection)?.into_vec())?;
		assert_eq!(decoded, collection);
		Ok(())
	}
}
