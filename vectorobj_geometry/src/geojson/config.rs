/// Options for the GeoJSON decoder.
#[derive(Clone, Debug)]
pub struct GeoJsonConfig {
	/// Reject polygon rings whose last position does not repeat the first one.
	pub strict_rings: bool,
	/// Quote the input around the error position in parse errors.
	pub debug_snippets: bool,
}

impl Default for GeoJsonConfig {
	fn default() -> Self {
		Self {
			strict_rings: false,
			debug_snippets: true,
		}
	}
}
