//! Regular latitude/longitude grid definition.

use ndarray::Array2;

use crate::error::{GridAxis, Result, WafError};
use crate::types::FieldShape;

/// Regular latitude/longitude grid.
///
/// Longitudes index the columns and latitudes the rows of every field.
/// Both axes are in degrees, strictly monotonic (ascending or descending)
/// and hold at least two points, so that one-sided differences exist at
/// the edges. Reanalysis products usually store latitude north-to-south.
///
/// # Example
///
/// ```
/// use waf_rs::grid::LatLonGrid;
///
/// let grid = LatLonGrid::global(2.5).unwrap();
/// assert_eq!(grid.n_lon(), 144);
/// assert_eq!(grid.n_lat(), 73);
/// assert_eq!(grid.lat()[0], 90.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LatLonGrid {
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl LatLonGrid {
    /// Create a grid from explicit axes, validating both.
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> Result<Self> {
        validate_axis(GridAxis::Longitude, &lon)?;
        validate_axis(GridAxis::Latitude, &lat)?;
        if let Some(bad) = lat.iter().find(|v| v.abs() > 90.0) {
            return Err(WafError::malformed(
                GridAxis::Latitude,
                format!("latitude {} outside [-90, 90]", bad),
            ));
        }
        Ok(Self { lon, lat })
    }

    /// Uniformly spaced grid from start values and (signed) steps.
    pub fn uniform(
        lon_start: f64,
        lon_step: f64,
        n_lon: usize,
        lat_start: f64,
        lat_step: f64,
        n_lat: usize,
    ) -> Result<Self> {
        let lon = (0..n_lon).map(|i| lon_start + lon_step * i as f64).collect();
        let lat = (0..n_lat).map(|j| lat_start + lat_step * j as f64).collect();
        Self::new(lon, lat)
    }

    /// Global grid at `resolution` degrees: longitudes `0..360` (exclusive),
    /// latitudes from 90 down to -90, the usual reanalysis layout.
    pub fn global(resolution: f64) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(WafError::InvalidInput(format!(
                "grid resolution must be positive, got {}",
                resolution
            )));
        }
        let n_lon = (360.0 / resolution).round() as usize;
        let n_lat = (180.0 / resolution).round() as usize + 1;
        Self::uniform(0.0, resolution, n_lon, 90.0, -resolution, n_lat)
    }

    /// Longitudes in degrees (columns).
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Latitudes in degrees (rows).
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Number of longitudes.
    #[inline]
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// Number of latitudes.
    #[inline]
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Shape every field on this grid must have.
    pub fn shape(&self) -> FieldShape {
        FieldShape::new(self.n_lat(), self.n_lon())
    }

    /// True if latitudes run north-to-south.
    pub fn is_lat_descending(&self) -> bool {
        self.lat[1] < self.lat[0]
    }

    /// Check that `field` is shaped `(n_lat, n_lon)`.
    pub fn check_field(&self, name: &str, field: &Array2<f64>) -> Result<()> {
        self.check_dim(name, field.dim())
    }

    /// Check a `(rows, cols)` field shape against the axis lengths.
    ///
    /// A disagreement means the coordinates do not describe the data, so it
    /// is reported as a malformed axis.
    pub fn check_dim(&self, name: &str, (n_rows, n_cols): (usize, usize)) -> Result<()> {
        if n_rows != self.n_lat() {
            return Err(WafError::malformed(
                GridAxis::Latitude,
                format!(
                    "{} latitudes but {} has {} rows",
                    self.n_lat(),
                    name,
                    n_rows
                ),
            ));
        }
        if n_cols != self.n_lon() {
            return Err(WafError::malformed(
                GridAxis::Longitude,
                format!(
                    "{} longitudes but {} has {} columns",
                    self.n_lon(),
                    name,
                    n_cols
                ),
            ));
        }
        Ok(())
    }
}

/// Reject empty, short, non-finite or non-monotonic axes.
fn validate_axis(axis: GridAxis, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(WafError::malformed(axis, "axis is empty"));
    }
    if values.len() < 2 {
        return Err(WafError::malformed(
            axis,
            "at least 2 points are needed for finite differences",
        ));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(WafError::malformed(
            axis,
            format!("non-finite coordinate at index {}", i),
        ));
    }

    let ascending = values[1] > values[0];
    for (i, pair) in values.windows(2).enumerate() {
        let step = pair[1] - pair[0];
        if step == 0.0 {
            return Err(WafError::malformed(
                axis,
                format!("zero spacing between indices {} and {}", i, i + 1),
            ));
        }
        if (step > 0.0) != ascending {
            return Err(WafError::malformed(
                axis,
                format!("not monotonic at index {}", i + 1),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_grid_layout() {
        let grid = LatLonGrid::global(1.5).unwrap();
        assert_eq!(grid.n_lon(), 240);
        assert_eq!(grid.n_lat(), 121);
        assert!(grid.is_lat_descending());
        assert!((grid.lat()[120] + 90.0).abs() < 1e-9);
        assert_eq!(grid.shape().dim(), (121, 240));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let err = LatLonGrid::new(vec![], vec![10.0, 20.0]).unwrap_err();
        assert!(matches!(
            err,
            WafError::MalformedGrid {
                axis: GridAxis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn test_single_point_axis_rejected() {
        let err = LatLonGrid::new(vec![0.0, 1.0], vec![45.0]).unwrap_err();
        assert!(matches!(
            err,
            WafError::MalformedGrid {
                axis: GridAxis::Latitude,
                ..
            }
        ));
    }

    #[test]
    fn test_non_monotonic_axis_rejected() {
        let err = LatLonGrid::new(vec![0.0, 2.0, 1.0], vec![10.0, 20.0]).unwrap_err();
        assert!(err.to_string().contains("not monotonic"));
    }

    #[test]
    fn test_repeated_coordinate_rejected() {
        let err = LatLonGrid::new(vec![0.0, 1.0], vec![30.0, 30.0, 40.0]).unwrap_err();
        assert!(err.to_string().contains("zero spacing"));
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let err = LatLonGrid::new(vec![0.0, f64::NAN], vec![30.0, 40.0]).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        assert!(LatLonGrid::new(vec![0.0, 1.0], vec![80.0, 95.0]).is_err());
    }

    #[test]
    fn test_check_field_shape() {
        let grid = LatLonGrid::uniform(0.0, 10.0, 4, 60.0, -10.0, 3).unwrap();
        assert!(grid.check_field("phi", &Array2::zeros((3, 4))).is_ok());

        let err = grid.check_field("phi", &Array2::zeros((4, 4))).unwrap_err();
        match err {
            WafError::MalformedGrid { axis, reason } => {
                assert_eq!(axis, GridAxis::Latitude);
                assert!(reason.contains("phi has 4 rows"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = grid.check_dim("u_c", (3, 5)).unwrap_err();
        assert!(matches!(
            err,
            WafError::MalformedGrid {
                axis: GridAxis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn test_global_rejects_bad_resolution() {
        assert!(LatLonGrid::global(0.0).is_err());
        assert!(LatLonGrid::global(f64::NAN).is_err());
    }
}
