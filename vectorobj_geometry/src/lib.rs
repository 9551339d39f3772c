//! Owned vector feature collections.
//!
//! A [`VectorCollection`] holds point, linear and areal features, each with an ordered
//! attribute dictionary. Collections are built by hand, decoded from GeoJSON (a single
//! document or a named assembly of documents) and stored in a compact binary format.
//!
//! ```rust
//! use vectorobj_geometry::{Point2d, VectorCollection};
//!
//! let mut collection = VectorCollection::new();
//! collection.add_point(Point2d::new(13.4, 52.5));
//! collection.add_linear(&[Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]).unwrap();
//!
//! let blob = collection.to_blob().unwrap();
//! assert_eq!(VectorCollection::from_blob(&blob).unwrap(), collection);
//! ```

pub mod binary;
mod collection;
mod error;
pub mod geojson;
mod types;

pub use collection::*;
pub use error::*;
pub use geojson::GeoJsonConfig;
pub use types::*;
