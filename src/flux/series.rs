//! Flux for a time series of geopotential fields.
//!
//! Time slices are independent given the climatology, so they can be
//! processed in any order. With the `parallel` feature the slices are
//! distributed over the rayon thread pool; results are always returned in
//! time order.

use ndarray::{Array3, Axis};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::kernel::{FluxKernel, WaveActivityFlux};
use crate::climatology::Climatology;
use crate::error::{Result, WafError};

impl FluxKernel {
    /// Compute the flux for every slice of a `(time, lat, lon)` series.
    pub fn compute_series(
        &self,
        clim: &Climatology,
        phi_series: &Array3<f64>,
    ) -> Result<Vec<WaveActivityFlux>> {
        let (n_time, n_lat, n_lon) = phi_series.dim();
        if clim.dim() != (n_lat, n_lon) {
            let (c_lat, c_lon) = clim.dim();
            return Err(WafError::shape_mismatch(
                "phi series",
                &[n_time, c_lat, c_lon],
                phi_series.shape(),
            ));
        }
        self.grid().check_dim("phi series", (n_lat, n_lon))?;
        log::debug!("Computing flux for {} time slices", n_time);

        let compute_slice = |t: usize| {
            let phi = phi_series.index_axis(Axis(0), t).to_owned();
            self.compute(clim, &phi)
        };

        #[cfg(feature = "parallel")]
        {
            (0..n_time).into_par_iter().map(compute_slice).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..n_time).map(compute_slice).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridAxis;
    use crate::flux::FluxConfig;
    use crate::grid::LatLonGrid;

    #[test]
    fn test_series_matches_single_slices() {
        let grid = LatLonGrid::uniform(0.0, 5.0, 72, 70.0, -5.0, 10).unwrap();
        let kernel = FluxKernel::new(grid.clone(), FluxConfig::default()).unwrap();
        let clim = Climatology::uniform(grid.shape().dim(), 12.0, 1.0, 0.0);

        let series = Array3::from_shape_fn((4, 10, 72), |(t, j, i)| {
            let lam = (5.0 * i as f64).to_radians();
            (100.0 + 20.0 * t as f64) * (3.0 * lam + 0.1 * j as f64 + t as f64).sin()
        });

        let all = kernel.compute_series(&clim, &series).unwrap();
        assert_eq!(all.len(), 4);

        for (t, flux) in all.iter().enumerate() {
            let single = kernel
                .compute(&clim, &series.index_axis(Axis(0), t).to_owned())
                .unwrap();
            assert_eq!(flux.px, single.px);
            assert_eq!(flux.py, single.py);
        }
    }

    #[test]
    fn test_series_shape_mismatch() {
        let grid = LatLonGrid::uniform(0.0, 5.0, 72, 70.0, -5.0, 10).unwrap();
        let kernel = FluxKernel::new(grid.clone(), FluxConfig::default()).unwrap();
        let clim = Climatology::uniform(grid.shape().dim(), 12.0, 1.0, 0.0);
        let series = Array3::zeros((2, 10, 71));
        assert!(matches!(
            kernel.compute_series(&clim, &series),
            Err(WafError::ShapeMismatch { .. })
        ));

        // Series and climatology agree, the longitude axis does not
        let clim = Climatology::uniform((10, 71), 12.0, 1.0, 0.0);
        assert!(matches!(
            kernel.compute_series(&clim, &series),
            Err(WafError::MalformedGrid {
                axis: GridAxis::Longitude,
                ..
            })
        ));
    }
}
