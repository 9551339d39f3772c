
use predicates::{prelude::*, str};
use test_utilities::*;

#[test]
fn probe_requires_filename() {
	vectorobj_cmd()
		.arg("probe")
		.assert()
		.failure()
		.code(2)
		.stderr(str::contains("Usage: vectorobj probe"));
}

#[test]
fn probe_geojson() {
	let input = get_testdata("cities.geojson");

	vectorobj_cmd()
		.args(["probe", path_str(&input)])
		.assert()
		.success()
		.stdout(
			str::contains("features: 6\n")
				.and(str::contains("  point: 4\n"))
				.and(str::contains("  linear: 1\n"))
				.and(str::contains("  areal: 1\n"))
				.and(str::contains("bounds: [-3.7038, 40.4168, 13.405, 53.55]\n"))
				.and(str::contains("attributes: {\"name\": \"Berlin\", \"population\": 3664088, \"capital\": true}\n")),
		);
}

#[test]
fn probe_vobj() {
	let input = get_testdata("assembly.json");
	let (temp_dir, output) = get_temp_output("layers");

	vectorobj_cmd()
		.args(["convert", "-q", "--assembly", path_str(&input), path_str(&output)])
		.assert()
		.success();

	vectorobj_cmd()
		.args(["probe", path_str(&output.join("places.vobj"))])
		.assert()
		.success()
		.stdout(str::contains("features: 2\n").and(str::contains("attributes: {}\n")));

	drop(temp_dir);
}

#[test]
fn probe_unsupported_extension() {
	vectorobj_cmd()
		.args(["probe", "file.shp"])
		.assert()
		.failure()
		.stderr(str::contains("unsupported input format"));
}
