use super::load_collection;
use anyhow::Result;
use std::{fmt::Write, path::PathBuf};
use vectorobj_geometry::{GeoJsonConfig, VectorCollection};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// file you want to probe
	/// supported formats are: *.geojson, *.json, *.vobj
	#[arg(required = true, verbatim_doc_comment)]
	filename: PathBuf,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe {:?}", arguments.filename);

	let collection = load_collection(&arguments.filename, &GeoJsonConfig::default())?;
	print!("{}", describe(&collection)?);
	Ok(())
}

fn describe(collection: &VectorCollection) -> Result<String> {
	let counts = collection.count_by_kind();
	let mut text = String::new();
	writeln!(text, "features: {}", collection.len())?;
	writeln!(text, "  point: {}", counts.point)?;
	writeln!(text, "  linear: {}", counts.linear)?;
	writeln!(text, "  areal: {}", counts.areal)?;
	match collection.bounds() {
		Some([x0, y0, x1, y1]) => writeln!(text, "bounds: [{x0}, {y0}, {x1}, {y1}]")?,
		None => writeln!(text, "bounds: none")?,
	}
	match collection.get_attributes() {
		Ok(attributes) => writeln!(text, "attributes: {attributes}")?,
		Err(_) => writeln!(text, "attributes: none")?,
	}
	Ok(text)
}
