//! Strongly-typed domain types.
//!
//! Newtypes keep physical scalars such as the pressure level from being
//! confused with other `f64` parameters, and [`FieldShape`] names the
//! `(n_lat, n_lon)` convention shared by every field.
//!
//! # Example
//!
//! ```
//! use waf_rs::types::{FieldShape, PressureLevel};
//!
//! let level = PressureLevel::new(250.0);
//! assert_eq!(level.normalized(), 0.25);
//!
//! let shape = FieldShape::new(90, 180);
//! assert_eq!(shape.n_cells(), 16200);
//! ```

mod physical;
mod resolution;

pub use physical::PressureLevel;
pub use resolution::FieldShape;
