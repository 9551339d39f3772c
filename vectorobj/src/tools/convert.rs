use super::load_collection;
use anyhow::{Context, Result, bail, ensure};
use std::path::{Path, PathBuf};
use vectorobj_geometry::{GeoJsonConfig, VectorCollection};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// supported input formats: *.geojson, *.json or *.vobj
	#[arg()]
	input_file: PathBuf,

	/// output *.vobj file, or an output directory together with --assembly
	#[arg()]
	output: PathBuf,

	/// read the input as an assembly of named GeoJSON documents and write one <name>.vobj per entry
	#[arg(long, display_order = 1)]
	assembly: bool,

	/// reject polygon rings that are not explicitly closed
	#[arg(long, display_order = 2)]
	strict_rings: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("convert from {:?} to {:?}", arguments.input_file, arguments.output);

	let config = GeoJsonConfig {
		strict_rings: arguments.strict_rings,
		..GeoJsonConfig::default()
	};

	if arguments.assembly {
		convert_assembly(&arguments.input_file, &arguments.output, &config)?;
	} else {
		ensure!(
			has_vobj_extension(&arguments.output),
			"output file {:?} must have the extension .vobj",
			arguments.output
		);
		let collection = load_collection(&arguments.input_file, &config)?;
		collection.write_to_file(&arguments.output)?;
		log::info!("wrote {} features", collection.len());
	}

	eprintln!("finished converting");
	Ok(())
}

fn has_vobj_extension(path: &Path) -> bool {
	path.extension().is_some_and(|e| e.eq_ignore_ascii_case("vobj"))
}

fn convert_assembly(input: &Path, output_dir: &Path, config: &GeoJsonConfig) -> Result<()> {
	let json = std::fs::read_to_string(input).with_context(|| format!("failed to read file {input:?}"))?;
	let assembly = VectorCollection::from_geojson_assembly_with(&json, config)
		.with_context(|| format!("failed to decode assembly {input:?}"))?;

	for name in assembly.keys() {
		check_entry_name(name)?;
	}

	std::fs::create_dir_all(output_dir).with_context(|| format!("failed to create directory {output_dir:?}"))?;
	for (name, collection) in &assembly {
		let path = output_dir.join(format!("{name}.vobj"));
		collection.write_to_file(&path)?;
		log::info!("wrote {} features of '{name}' to {path:?}", collection.len());
	}
	Ok(())
}

/// Entry names become file names, so they must not escape the output directory.
fn check_entry_name(name: &str) -> Result<()> {
	if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
		bail!("assembly entry name {name:?} cannot be used as a file name");
	}
	Ok(())
}
