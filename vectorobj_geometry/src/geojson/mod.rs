//! GeoJSON decoding into [`Feature`](crate::Feature) lists.
//!
//! Supported inputs are `Feature`, `FeatureCollection`, `GeometryCollection` and the six
//! bare geometry types. Multi geometries are split into one feature per element. A named
//! assembly is a JSON object whose members are GeoJSON documents.

mod assembly;
mod config;
mod coordinates;
mod parse;

pub use assembly::*;
pub use config::*;
pub use parse::*;
