//! The `VOBJ` binary file format.
//!
//! All multi-byte values are little-endian.
//!
//! ```text
//! header      magic "VOBJ", version u8 (= 1), feature count u32
//! feature     kind u8 (0 point, 1 linear, 2 areal)
//!   point     n u32 (= 1), n * (f64 x, f64 y)
//!   linear    n u32 (>= 2), n * (f64 x, f64 y)
//!   areal     ring count u32 (>= 1), per ring: n u32 (>= 3), n * (f64 x, f64 y), stored open
//! attributes  count u32, per entry: key (u32 length + UTF-8), value
//! value       tag u8, then 0 null, 1 bool u8, 2 int i64, 3 uint u64, 4 double f64,
//!             5 string (u32 length + UTF-8), 6 list (u32 count + values), 7 map (attributes)
//! ```

mod format;
mod read;
mod write;

pub use format::*;
pub use read::*;
pub use write::*;
