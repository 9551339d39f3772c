use super::format::*;
use crate::{AttrDictionary, AttrValue, Feature, Geometry, Point2d, VectorCollection};
use anyhow::{Context, Result, ensure};
use byteorder::LittleEndian;
use log::debug;
use std::{fs::File, path::Path};
use vectorobj_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob, ValueWriterFile},
};

/// Encodes a collection into a new [`Blob`].
pub fn encode_collection(collection: &VectorCollection) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new_le();
	write_collection(&mut writer, collection)?;
	Ok(writer.into_blob())
}

/// Encodes a collection into a file, replacing any existing file.
pub fn write_collection_file(collection: &VectorCollection, path: &Path) -> Result<()> {
	let file = File::create(path).with_context(|| format!("failed to create file {path:?}"))?;
	let mut writer = ValueWriterFile::new_le(file);
	if let Err(error) = write_collection(&mut writer, collection) {
		drop(writer);
		std::fs::remove_file(path).ok();
		return Err(error.context(format!("failed to write file {path:?}")));
	}
	let size = writer.position()?;
	writer.finish().with_context(|| format!("failed to write file {path:?}"))?;
	debug!("wrote {} features ({size} bytes) to {path:?}", collection.len());
	Ok(())
}

pub fn write_collection<W: ValueWriter<LittleEndian>>(writer: &mut W, collection: &VectorCollection) -> Result<()> {
	writer.write_slice(MAGIC)?;
	writer.write_u8(FORMAT_VERSION)?;
	writer.write_count(collection.len())?;
	for feature in collection {
		write_feature(writer, feature)?;
	}
	Ok(())
}

fn write_feature<W: ValueWriter<LittleEndian>>(writer: &mut W, feature: &Feature) -> Result<()> {
	writer.write_u8(feature.kind().as_tag())?;
	match &feature.geometry {
		Geometry::Point(point) => write_points(writer, std::slice::from_ref(point))?,
		Geometry::Linear(points) => write_points(writer, points)?,
		Geometry::Areal(rings) => {
			writer.write_count(rings.len())?;
			for ring in rings {
				write_points(writer, ring)?;
			}
		}
	}
	write_attributes(writer, &feature.attributes, 0)
}

fn write_points<W: ValueWriter<LittleEndian>>(writer: &mut W, points: &[Point2d]) -> Result<()> {
	writer.write_count(points.len())?;
	for point in points {
		writer.write_f64(point.x)?;
		writer.write_f64(point.y)?;
	}
	Ok(())
}

fn write_attributes<W: ValueWriter<LittleEndian>>(
	writer: &mut W,
	attributes: &AttrDictionary,
	depth: usize,
) -> Result<()> {
	writer.write_count(attributes.len())?;
	for (key, value) in attributes {
		writer.write_len_string(key)?;
		write_value(writer, value, depth).with_context(|| format!("failed to write attribute '{key}'"))?;
	}
	Ok(())
}

/// Values nested [`MAX_VALUE_DEPTH`] levels or deeper are rejected, matching the decoder.
fn write_value<W: ValueWriter<LittleEndian>>(writer: &mut W, value: &AttrValue, depth: usize) -> Result<()> {
	ensure!(depth < MAX_VALUE_DEPTH, "attribute values are nested too deeply");

	match value {
		AttrValue::Null => writer.write_u8(VALUE_NULL),
		AttrValue::Bool(v) => {
			writer.write_u8(VALUE_BOOL)?;
			writer.write_u8(u8::from(*v))
		}
		AttrValue::Int(v) => {
			writer.write_u8(VALUE_INT)?;
			writer.write_i64(*v)
		}
		AttrValue::UInt(v) => {
			writer.write_u8(VALUE_UINT)?;
			writer.write_u64(*v)
		}
		AttrValue::Double(v) => {
			writer.write_u8(VALUE_DOUBLE)?;
			writer.write_f64(*v)
		}
		AttrValue::String(v) => {
			writer.write_u8(VALUE_STRING)?;
			writer.write_len_string(v)
		}
		AttrValue::List(list) => {
			writer.write_u8(VALUE_LIST)?;
			writer.write_count(list.len())?;
			for item in list {
				write_value(writer, item, depth + 1)?;
			}
			Ok(())
		}
		AttrValue::Map(map) => {
			writer.write_u8(VALUE_MAP)?;
			write_attributes(writer, map, depth + 1)
		}
	}
}
