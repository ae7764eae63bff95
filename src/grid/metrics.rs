//! Latitude-dependent metric terms of a lat/lon grid.
//!
//! For a grid with longitudes λ and latitudes φ (degrees):
//!
//! - dλ[i], dφ[j]: local angular spacing in radians (gradient of the axis)
//! - f[j] = 2Ω sin φ[j]: Coriolis parameter
//! - cos φ[j]
//!
//! At 60°N, f ≈ 1.26×10⁻⁴ s⁻¹; at the equator f = 0 and the geostrophic
//! streamfunction is undefined.

use ndarray::Array1;

use super::LatLonGrid;
use crate::operators::axis_spacing;

/// Earth's rotation rate Ω (rad/s).
pub const EARTH_ROTATION_RATE: f64 = 7.292e-5;

/// Metric terms derived from a [`LatLonGrid`].
///
/// All arrays are indexed like the grid axes: `d_lon` by column,
/// the others by row.
#[derive(Clone, Debug)]
pub struct GridMetrics {
    /// Longitude spacing in radians, per column
    pub d_lon: Array1<f64>,
    /// Latitude spacing in radians, per row (negative for north-to-south axes)
    pub d_lat: Array1<f64>,
    /// Coriolis parameter f = 2Ω sin φ (s⁻¹), per row
    pub coriolis: Array1<f64>,
    /// cos φ, per row
    pub cos_lat: Array1<f64>,
}

impl GridMetrics {
    /// Compute the metric terms for `grid` with rotation rate `omega`.
    pub fn new(grid: &LatLonGrid, omega: f64) -> Self {
        let d_lon = axis_spacing(grid.lon()).mapv(f64::to_radians);
        let d_lat = axis_spacing(grid.lat()).mapv(f64::to_radians);

        let coriolis = grid
            .lat()
            .iter()
            .map(|&lat| coriolis_parameter(lat, omega))
            .collect();
        let cos_lat = grid.lat().iter().map(|&lat| lat.to_radians().cos()).collect();

        Self {
            d_lon,
            d_lat,
            coriolis,
            cos_lat,
        }
    }

    /// Number of latitude rows.
    pub fn n_lat(&self) -> usize {
        self.cos_lat.len()
    }

    /// Number of longitude columns.
    pub fn n_lon(&self) -> usize {
        self.d_lon.len()
    }
}

/// Coriolis parameter f = 2Ω sin(φ) at latitude `lat` (degrees).
#[inline]
pub fn coriolis_parameter(lat: f64, omega: f64) -> f64 {
    2.0 * omega * lat.to_radians().sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_coriolis_values() {
        assert!(coriolis_parameter(0.0, EARTH_ROTATION_RATE).abs() < TOL);
        assert!(
            (coriolis_parameter(90.0, EARTH_ROTATION_RATE) - 2.0 * EARTH_ROTATION_RATE).abs() < TOL
        );
        // 30°N: f = Ω
        assert!(
            (coriolis_parameter(30.0, EARTH_ROTATION_RATE) - EARTH_ROTATION_RATE).abs() < 1e-18
        );
        // Antisymmetric about the equator
        assert!(
            (coriolis_parameter(-45.0, EARTH_ROTATION_RATE)
                + coriolis_parameter(45.0, EARTH_ROTATION_RATE))
            .abs()
                < TOL
        );
    }

    #[test]
    fn test_spacing_in_radians() {
        let grid = LatLonGrid::uniform(0.0, 2.5, 144, 90.0, -2.5, 73).unwrap();
        let metrics = GridMetrics::new(&grid, EARTH_ROTATION_RATE);

        let step = 2.5 * PI / 180.0;
        assert!(metrics.d_lon.iter().all(|&d| (d - step).abs() < 1e-12));
        assert!(metrics.d_lat.iter().all(|&d| (d + step).abs() < 1e-12));
        assert_eq!(metrics.n_lon(), 144);
        assert_eq!(metrics.n_lat(), 73);
    }

    #[test]
    fn test_cos_lat_profile() {
        let grid = LatLonGrid::new(vec![0.0, 1.0], vec![60.0, 0.0, -60.0]).unwrap();
        let metrics = GridMetrics::new(&grid, EARTH_ROTATION_RATE);

        assert!((metrics.cos_lat[0] - 0.5).abs() < 1e-12);
        assert!((metrics.cos_lat[1] - 1.0).abs() < TOL);
        assert!((metrics.cos_lat[2] - 0.5).abs() < 1e-12);
        assert!(metrics.coriolis[0] > 0.0);
        assert!(metrics.coriolis[2] < 0.0);
    }

    #[test]
    fn test_custom_rotation_rate() {
        let grid = LatLonGrid::new(vec![0.0, 1.0], vec![90.0, 80.0]).unwrap();
        let metrics = GridMetrics::new(&grid, 1.0);
        assert!((metrics.coriolis[0] - 2.0).abs() < TOL);
    }
}
