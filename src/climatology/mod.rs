//! Climatological background state.
//!
//! The basic state of the flux diagnostic is the long-term mean of the
//! zonal wind U_c, meridional wind V_c and geopotential Φ_c on the analysis
//! level. It is built once, as the arithmetic mean over the time dimension
//! of a `(time, lat, lon)` series, and is read-only afterwards.
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use waf_rs::climatology::Climatology;
//!
//! let u = Array3::from_elem((12, 3, 4), 10.0);
//! let v = Array3::zeros((12, 3, 4));
//! let z = Array3::from_elem((12, 3, 4), 9.0e4);
//!
//! let clim = Climatology::from_time_series(&u, &v, &z).unwrap();
//! assert_eq!(clim.dim(), (3, 4));
//! assert_eq!(clim.u()[[1, 2]], 10.0);
//! ```

use ndarray::{Array2, Array3, Axis};

use crate::error::{Result, WafError};

/// Time-mean wind and geopotential on one isobaric level.
#[derive(Clone, Debug)]
pub struct Climatology {
    u: Array2<f64>,
    v: Array2<f64>,
    phi: Array2<f64>,
}

impl Climatology {
    /// Build from already-averaged fields.
    ///
    /// All three fields must share one shape.
    pub fn new(u: Array2<f64>, v: Array2<f64>, phi: Array2<f64>) -> Result<Self> {
        let dim = phi.dim();
        if u.dim() != dim {
            return Err(WafError::shape_mismatch("u_c", phi.shape(), u.shape()));
        }
        if v.dim() != dim {
            return Err(WafError::shape_mismatch("v_c", phi.shape(), v.shape()));
        }
        Ok(Self { u, v, phi })
    }

    /// Average `(time, lat, lon)` series over time.
    ///
    /// All three series must cover the same time steps on the same grid.
    pub fn from_time_series(u: &Array3<f64>, v: &Array3<f64>, phi: &Array3<f64>) -> Result<Self> {
        for (name, series) in [("u", u), ("v", v)] {
            if series.dim() != phi.dim() {
                return Err(WafError::shape_mismatch(name, phi.shape(), series.shape()));
            }
        }
        let n_time = phi.len_of(Axis(0));
        let clim = Self::new(time_mean(u)?, time_mean(v)?, time_mean(phi)?)?;
        log::debug!(
            "Climatology averaged over {} time steps on a {:?} grid",
            n_time,
            clim.dim()
        );
        Ok(clim)
    }

    /// Spatially uniform background, useful for idealised experiments.
    pub fn uniform(dim: (usize, usize), u: f64, v: f64, phi: f64) -> Self {
        Self {
            u: Array2::from_elem(dim, u),
            v: Array2::from_elem(dim, v),
            phi: Array2::from_elem(dim, phi),
        }
    }

    /// Zonal wind U_c (m/s).
    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    /// Meridional wind V_c (m/s).
    pub fn v(&self) -> &Array2<f64> {
        &self.v
    }

    /// Geopotential Φ_c (m²/s²).
    pub fn phi(&self) -> &Array2<f64> {
        &self.phi
    }

    /// Field shape `(n_lat, n_lon)`.
    pub fn dim(&self) -> (usize, usize) {
        self.phi.dim()
    }

    /// Wind speed |U_c| = sqrt(U_c² + V_c²).
    pub fn wind_speed(&self) -> Array2<f64> {
        let mut speed = self.u.clone();
        speed.zip_mut_with(&self.v, |u, &v| *u = u.hypot(v));
        speed
    }
}

/// Arithmetic mean over the leading (time) axis.
///
/// Missing values should arrive as NaN; they propagate into the mean and
/// are flagged downstream as non-finite cells.
pub fn time_mean(series: &Array3<f64>) -> Result<Array2<f64>> {
    series
        .mean_axis(Axis(0))
        .ok_or_else(|| WafError::InvalidInput("time series has no time steps".to_string()))
}

/// Copy out time step `index` of a `(time, lat, lon)` series.
pub fn time_slice(series: &Array3<f64>, index: usize) -> Result<Array2<f64>> {
    let n_time = series.len_of(Axis(0));
    if index >= n_time {
        return Err(WafError::InvalidInput(format!(
            "time index {} out of range for {} time steps",
            index, n_time
        )));
    }
    Ok(series.index_axis(Axis(0), index).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_time_mean_is_arithmetic_mean() {
        // Values 0, 1, 2, 3 at every cell
        let series = Array3::from_shape_fn((4, 2, 3), |(t, _, _)| t as f64);
        let mean = time_mean(&series).unwrap();
        assert!(mean.iter().all(|&m| (m - 1.5).abs() < TOL));
    }

    #[test]
    fn test_time_mean_empty_rejected() {
        let series = Array3::<f64>::zeros((0, 2, 3));
        assert!(matches!(time_mean(&series), Err(WafError::InvalidInput(_))));
        assert!(matches!(
            Climatology::from_time_series(&series, &series, &series),
            Err(WafError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_series_of_different_lengths_rejected() {
        let u = Array3::from_elem((10, 2, 3), 10.0);
        let v = Array3::zeros((1, 2, 3));
        let z = Array3::zeros((5, 2, 3));

        let err = Climatology::from_time_series(&u, &v, &z).unwrap_err();
        match err {
            WafError::ShapeMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "u");
                assert_eq!(expected, vec![5, 2, 3]);
                assert_eq!(actual, vec![10, 2, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Climatology::from_time_series(&z, &v, &z).unwrap_err();
        assert!(matches!(err, WafError::ShapeMismatch { ref field, .. } if field == "v"));
    }

    #[test]
    fn test_time_slice_bounds() {
        let series = Array3::from_shape_fn((3, 2, 2), |(t, j, i)| (100 * t + 10 * j + i) as f64);
        let slice = time_slice(&series, 2).unwrap();
        assert_eq!(slice[[1, 1]], 211.0);
        assert!(time_slice(&series, 3).is_err());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = Climatology::new(
            Array2::zeros((3, 4)),
            Array2::zeros((3, 5)),
            Array2::zeros((3, 4)),
        )
        .unwrap_err();
        assert!(matches!(err, WafError::ShapeMismatch { ref field, .. } if field == "v_c"));
    }

    #[test]
    fn test_wind_speed() {
        let clim = Climatology::uniform((2, 2), 3.0, 4.0, 0.0);
        assert!(clim.wind_speed().iter().all(|&s| (s - 5.0).abs() < TOL));
    }
}
