//! Horizontal Takaya–Nakamura (2001) wave-activity flux.
//!
//! For a stationary wave (C_u = 0) on an isobaric surface at pressure p
//! (normalised by 1000 hPa), the horizontal components of TN01 Eq. 38 are
//!
//! ```text
//! W_x = p cos φ / (2|U|) · 1/(a² cos φ) · [ U/cos φ · termXU + V · termXV ]
//! W_y = p cos φ / (2|U|) · 1/a²         · [ U/cos φ · termXV + V · termYV ]
//! ```
//!
//! with ψ′ = (Φ − Φ_c)/f and the quadratic terms of [`FluxTerms`]. The flux
//! has units of m²/s² and points along the group velocity of stationary
//! Rossby waves.
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use waf_rs::climatology::Climatology;
//! use waf_rs::flux::{FluxConfig, FluxKernel};
//! use waf_rs::grid::LatLonGrid;
//!
//! let grid = LatLonGrid::uniform(0.0, 5.0, 72, 75.0, -5.0, 12).unwrap();
//! let clim = Climatology::uniform(grid.shape().dim(), 15.0, 0.0, 9.0e4);
//! let phi = Array2::from_shape_fn(grid.shape().dim(), |(_, i)| {
//!     9.0e4 + 500.0 * (3.0 * (5.0 * i as f64).to_radians()).sin()
//! });
//!
//! let kernel = FluxKernel::new(grid, FluxConfig::default()).unwrap();
//! let flux = kernel.compute(&clim, &phi).unwrap();
//! assert_eq!(flux.px.dim(), (12, 72));
//! assert!(flux.mask.is_clear());
//! ```

use ndarray::Array2;

use super::config::FluxConfig;
use super::singular::{SingularMask, Singularity};
use super::terms::{FluxTerms, StreamfunctionDerivatives};
use crate::climatology::Climatology;
use crate::error::{Result, WafError};
use crate::grid::{GridMetrics, LatLonGrid};
use crate::operators::{div_rows, mul_rows};

/// Flux computation bound to one grid and configuration.
///
/// Metric terms are computed once in [`FluxKernel::new`]; each call to
/// [`FluxKernel::compute`] is a pure function of its inputs.
#[derive(Clone, Debug)]
pub struct FluxKernel {
    grid: LatLonGrid,
    metrics: GridMetrics,
    config: FluxConfig,
}

impl FluxKernel {
    /// Validate `config` and precompute grid metrics.
    pub fn new(grid: LatLonGrid, config: FluxConfig) -> Result<Self> {
        config.validate()?;
        let metrics = GridMetrics::new(&grid, config.omega);
        log::debug!(
            "Flux kernel on {} grid at {} (a = {:.3e} m, Ω = {:.4e} rad/s)",
            grid.shape(),
            config.pressure_level,
            config.earth_radius,
            config.omega
        );
        Ok(Self {
            grid,
            metrics,
            config,
        })
    }

    /// The grid all fields must live on.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Precomputed metric terms.
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Physical configuration.
    pub fn config(&self) -> &FluxConfig {
        &self.config
    }

    /// Perturbation streamfunction ψ′ = (Φ − Φ_c)/f.
    ///
    /// Rows where f vanishes (the equator) come out non-finite.
    pub fn streamfunction(&self, clim: &Climatology, phi: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_inputs(clim, phi)?;
        Ok(self.streamfunction_unchecked(clim, phi))
    }

    /// The five partial derivatives of `psi` on this grid.
    pub fn derivatives(&self, psi: &Array2<f64>) -> Result<StreamfunctionDerivatives> {
        self.grid.check_field("psi", psi)?;
        Ok(StreamfunctionDerivatives::compute(psi, &self.metrics))
    }

    /// Compute ψ′ and the flux vector for one instantaneous geopotential field.
    ///
    /// Grid and shape problems fail before any arithmetic. Singular cells
    /// are flagged in the result's mask and hold NaN flux.
    pub fn compute(&self, clim: &Climatology, phi: &Array2<f64>) -> Result<WaveActivityFlux> {
        self.check_inputs(clim, phi)?;

        let mut psi = self.streamfunction_unchecked(clim, phi);
        let derivatives = StreamfunctionDerivatives::compute(&psi, &self.metrics);
        let terms = FluxTerms::from_derivatives(&psi, &derivatives);

        let (n_lat, n_lon) = psi.dim();
        let tol = self.config.singular_tolerance;
        let a2 = self.config.earth_radius * self.config.earth_radius;
        let p = self.config.pressure_level.normalized();
        let speed = clim.wind_speed();
        let coeff = mul_rows(&speed.mapv(|s| p / (2.0 * s)), &self.metrics.cos_lat);
        let u_term = div_rows(clim.u(), &self.metrics.cos_lat);
        let v_c = clim.v();

        let mut px = Array2::zeros((n_lat, n_lon));
        let mut py = Array2::zeros((n_lat, n_lon));
        let mut mask = SingularMask::none((n_lat, n_lon));

        for j in 0..n_lat {
            let cos_lat = self.metrics.cos_lat[j];
            let row_cause = if self.metrics.coriolis[j].abs() <= tol {
                Some(Singularity::Equator)
            } else if cos_lat.abs() <= tol {
                Some(Singularity::Pole)
            } else {
                None
            };

            for i in 0..n_lon {
                let cause = row_cause.or_else(|| {
                    (speed[[j, i]].is_finite() && speed[[j, i]] <= tol)
                        .then_some(Singularity::CalmWind)
                });
                if let Some(cause) = cause {
                    mask.flag(j, i, cause);
                    px[[j, i]] = f64::NAN;
                    py[[j, i]] = f64::NAN;
                    continue;
                }

                let (c, u, v) = (coeff[[j, i]], u_term[[j, i]], v_c[[j, i]]);
                let wx = c / (a2 * cos_lat) * (u * terms.xu[[j, i]] + v * terms.xv[[j, i]]);
                let wy = c / a2 * (u * terms.xv[[j, i]] + v * terms.yv[[j, i]]);

                if wx.is_finite() && wy.is_finite() {
                    px[[j, i]] = wx;
                    py[[j, i]] = wy;
                } else {
                    mask.flag(j, i, Singularity::NonFinite);
                    px[[j, i]] = f64::NAN;
                    py[[j, i]] = f64::NAN;
                }
            }

            if row_cause == Some(Singularity::Equator) {
                psi.row_mut(j).fill(f64::NAN);
            }
        }

        psi.mapv_inplace(|v| if v.is_finite() { v } else { f64::NAN });
        mask.log_summary();

        Ok(WaveActivityFlux { psi, px, py, mask })
    }

    fn streamfunction_unchecked(&self, clim: &Climatology, phi: &Array2<f64>) -> Array2<f64> {
        let anomaly = phi - clim.phi();
        div_rows(&anomaly, &self.metrics.coriolis)
    }

    /// Fail fast: fields must agree with each other, then with the axes.
    fn check_inputs(&self, clim: &Climatology, phi: &Array2<f64>) -> Result<()> {
        for (name, field) in [("u_c", clim.u()), ("v_c", clim.v()), ("phi_c", clim.phi())] {
            if field.dim() != phi.dim() {
                return Err(WafError::shape_mismatch(name, phi.shape(), field.shape()));
            }
        }
        self.grid.check_field("phi", phi)
    }
}

/// Perturbation streamfunction and horizontal flux on the input grid.
#[derive(Clone, Debug)]
pub struct WaveActivityFlux {
    /// Perturbation streamfunction ψ′ (m²/s); NaN where f vanishes.
    pub psi: Array2<f64>,
    /// Zonal flux component (m²/s²); NaN at singular cells.
    pub px: Array2<f64>,
    /// Meridional flux component (m²/s²); NaN at singular cells.
    pub py: Array2<f64>,
    /// Cells where the flux is undefined, with the cause.
    pub mask: SingularMask,
}

impl WaveActivityFlux {
    /// Field shape `(n_lat, n_lon)`.
    pub fn dim(&self) -> (usize, usize) {
        self.px.dim()
    }

    /// Flux magnitude sqrt(px² + py²), NaN at singular cells.
    pub fn magnitude(&self) -> Array2<f64> {
        let mut mag = self.px.clone();
        mag.zip_mut_with(&self.py, |x, &y| *x = x.hypot(y));
        mag
    }

    /// ψ′ divided by `factor`, e.g. 1e6 for maps in 10⁶ m²/s.
    pub fn psi_scaled(&self, factor: f64) -> Array2<f64> {
        self.psi.mapv(|v| v / factor)
    }

    /// Number of flagged cells.
    pub fn n_singular(&self) -> usize {
        self.mask.count()
    }

    /// Return `self` only if no cell was flagged.
    pub fn require_regular(self) -> Result<Self> {
        match self.mask.count() {
            0 => Ok(self),
            count => Err(WafError::SingularCoefficient { count }),
        }
    }
}
