//! # vectorobj
//!
//! Owned collections of point, linear and areal features with attribute dictionaries.
//!
//! ## Features
//! - **Build**: add points, polylines and polygons (with holes) and attach attributes.
//! - **Decode**: read GeoJSON documents and named assemblies of GeoJSON documents.
//! - **Store**: write and read the compact `VOBJ` binary format.
//!
//! ## Usage Example
//!
//! ```rust
//! use vectorobj::{FeatureKind, VectorCollection};
//!
//! let json = r#"{"type": "Feature",
//!     "geometry": {"type": "MultiPoint", "coordinates": [[13.4, 52.5], [2.35, 48.85]]},
//!     "properties": {"kind": "capital"}}"#;
//!
//! let collection = VectorCollection::from_geojson(json).unwrap();
//! assert_eq!(collection.len(), 2);
//! assert!(collection.iter().all(|feature| feature.kind() == FeatureKind::Point));
//!
//! let path = std::env::temp_dir().join("capitals.vobj");
//! collection.write_to_file(&path).unwrap();
//! assert_eq!(VectorCollection::read_from_file(&path).unwrap(), collection);
//! ```

pub use vectorobj_core as core;
pub use vectorobj_geometry::*;
