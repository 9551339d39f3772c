pub mod convert;
pub mod probe;

use anyhow::{Context, Result, bail};
use log::debug;
use std::path::Path;
use vectorobj_geometry::{GeoJsonConfig, VectorCollection};

/// Reads a `.vobj` file or decodes a `.geojson`/`.json` file, chosen by extension.
pub fn load_collection(path: &Path, config: &GeoJsonConfig) -> Result<VectorCollection> {
	let extension = path
		.extension()
		.and_then(|e| e.to_str())
		.map(str::to_ascii_lowercase)
		.unwrap_or_default();
	debug!("loading {path:?} as '{extension}'");

	Ok(match extension.as_str() {
		"vobj" => VectorCollection::read_from_file(path)?,
		"geojson" | "json" => {
			let json = std::fs::read_to_string(path).with_context(|| format!("failed to read file {path:?}"))?;
			VectorCollection::from_geojson_with(&json, config).with_context(|| format!("failed to decode {path:?}"))?
		}
		_ => bail!("unsupported input format {path:?}, expected *.geojson, *.json or *.vobj"),
	})
}
