mod attributes;
mod feature;
mod geometry;
mod point;
mod value;

pub use attributes::*;
pub use feature::*;
pub use geometry::*;
pub use point::*;
pub use value::*;
