//! Named assemblies: one JSON object mapping names to GeoJSON documents.
//!
//! ```json
//! { "roads": { "type": "FeatureCollection", "features": [] },
//!   "poi": { "type": "Point", "coordinates": [1, 2] } }
//! ```

use super::{
	GeoJsonConfig,
	parse::{parse_error, parse_geojson_object},
};
use crate::{Feature, VectorResult};
use anyhow::{Result, bail};
use indexmap::IndexMap;
use log::debug;
use vectorobj_core::byte_iterator::{ByteIterator, parse_object_entries};

/// Decodes every entry of an assembly. Entries keep document order; a duplicate name or any
/// malformed entry fails the whole assembly.
pub fn parse_geojson_assembly(json: &str, config: &GeoJsonConfig) -> VectorResult<IndexMap<String, Vec<Feature>>> {
	let mut iter = ByteIterator::from_str(json, config.debug_snippets);
	match parse_assembly(&mut iter, config) {
		Ok(entries) => {
			debug!("decoded GeoJSON assembly with {} entries", entries.len());
			Ok(entries)
		}
		Err(error) => Err(parse_error(&iter, &error)),
	}
}

fn parse_assembly(iter: &mut ByteIterator, config: &GeoJsonConfig) -> Result<IndexMap<String, Vec<Feature>>> {
	let mut entries = IndexMap::new();

	parse_object_entries(iter, |name, iter2| {
		if entries.contains_key(&name) {
			bail!(iter2.format_error(&format!("duplicate assembly entry '{name}'")));
		}
		let features = parse_geojson_object(iter2, config, 0)?.into_features();
		debug!("assembly entry '{name}': {} features", features.len());
		entries.insert(name, features);
		Ok(())
	})?;

	iter.expect_end()?;
	Ok(entries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::VectorError;
	use pretty_assertions::assert_eq;

	fn parse(json: &str) -> VectorResult<IndexMap<String, Vec<Feature>>> {
		parse_geojson_assembly(json, &GeoJsonConfig::default())
	}

	#[test]
	fn entries_keep_document_order() -> VectorResult<()> {
		let json = r#"{
			"zeta": {"type": "Point", "coordinates": [0, 0]},
			"alpha": {"type": "FeatureCollection", "features": [
				{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 1]}, "properties": null},
				{"type": "Feature", "geometry": {"type": "Point", "coordinates": [2, 2]}, "properties": null}
			]},
			"empty": {"type": "FeatureCollection", "features": []}
		}"#;
		let entries = parse(json)?;
		let names: Vec<&str> = entries.keys().map(String::as_str).collect();
		assert_eq!(names, vec!["zeta", "alpha", "empty"]);
		assert_eq!(entries["zeta"].len(), 1);
		assert_eq!(entries["alpha"].len(), 2);
		assert!(entries["empty"].is_empty());
		Ok(())
	}

	#[test]
	fn empty_assembly() -> VectorResult<()> {
		assert!(parse(" {} ")?.is_empty());
		Ok(())
	}

	#[test]
	fn one_malformed_entry_fails_everything() {
		let json = r#"{
			"good": {"type": "Point", "coordinates": [0, 0]},
			"bad": {"type": "Point", "coordinates": [1]}
		}"#;
		let Err(VectorError::Parse { reason, line, .. }) = parse(json) else {
			panic!("expected a parse error");
		};
		assert!(reason.starts_with("a position must have 2 or 3 numbers"), "{reason}");
		assert_eq!(line, 3);
	}

	#[test]
	fn duplicate_names_fail() {
		let json = r#"{"a": {"type": "Point", "coordinates": [0, 0]}, "a": {"type": "Point", "coordinates": [1, 1]}}"#;
		let Err(VectorError::Parse { reason, .. }) = parse(json) else {
			panic!("expected a parse error");
		};
		assert!(reason.starts_with("duplicate assembly entry 'a'"), "{reason}");
	}

	#[test]
	fn assembly_must_be_an_object() {
		assert!(parse("[]").is_err());
		assert!(parse(r#"{"a": {"type": "Point", "coordinates": [0, 0]}} []"#).is_err());
	}
}
