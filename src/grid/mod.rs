//! Grid representation.
//!
//! Provides the regular latitude/longitude grid shared by all fields and
//! the metric terms derived from it:
//! - [`LatLonGrid`]: validated longitude/latitude axes (degrees)
//! - [`GridMetrics`]: angular spacings (radians), Coriolis parameter, cos φ

mod latlon;
mod metrics;

pub use latlon::LatLonGrid;
pub use metrics::{EARTH_ROTATION_RATE, GridMetrics, coriolis_parameter};
