//! Streamfunction derivatives and the quadratic flux terms.
//!
//! With λ longitude and φ latitude in radians, the horizontal TN01 flux is
//! built from
//!
//! ```text
//! termXU = ψ′_λ² − ψ′ ψ′_λλ
//! termXV = ψ′_λ ψ′_φ − ψ′ ψ′_λφ
//! termYV = ψ′_φ² − ψ′ ψ′_φφ
//! ```
//!
//! All three are even in ψ′: flipping the sign of the perturbation leaves
//! them unchanged.

use ndarray::{Array2, Axis, Zip};

use crate::grid::GridMetrics;
use crate::operators::gradient_along;

/// First and second partial derivatives of ψ′ in λ and φ (radians).
#[derive(Clone, Debug)]
pub struct StreamfunctionDerivatives {
    /// ∂ψ′/∂λ
    pub dpsi_dlon: Array2<f64>,
    /// ∂ψ′/∂φ
    pub dpsi_dlat: Array2<f64>,
    /// ∂²ψ′/∂λ²
    pub d2psi_dlon2: Array2<f64>,
    /// ∂²ψ′/∂φ²
    pub d2psi_dlat2: Array2<f64>,
    /// ∂²ψ′/∂λ∂φ, the longitude derivative of ∂ψ′/∂φ
    pub d2psi_dlondlat: Array2<f64>,
}

impl StreamfunctionDerivatives {
    /// Differentiate `psi` on the grid described by `metrics`.
    ///
    /// # Panics
    ///
    /// Panics if `psi` is not shaped `(metrics.n_lat(), metrics.n_lon())`.
    pub fn compute(psi: &Array2<f64>, metrics: &GridMetrics) -> Self {
        let lon = Axis(1);
        let lat = Axis(0);

        let dpsi_dlon = gradient_along(psi, lon, &metrics.d_lon);
        let dpsi_dlat = gradient_along(psi, lat, &metrics.d_lat);
        let d2psi_dlon2 = gradient_along(&dpsi_dlon, lon, &metrics.d_lon);
        let d2psi_dlat2 = gradient_along(&dpsi_dlat, lat, &metrics.d_lat);
        let d2psi_dlondlat = gradient_along(&dpsi_dlat, lon, &metrics.d_lon);

        Self {
            dpsi_dlon,
            dpsi_dlat,
            d2psi_dlon2,
            d2psi_dlat2,
            d2psi_dlondlat,
        }
    }
}

/// The three quadratic terms of the horizontal flux.
#[derive(Clone, Debug)]
pub struct FluxTerms {
    /// ψ′_λ² − ψ′ ψ′_λλ
    pub xu: Array2<f64>,
    /// ψ′_λ ψ′_φ − ψ′ ψ′_λφ
    pub xv: Array2<f64>,
    /// ψ′_φ² − ψ′ ψ′_φφ
    pub yv: Array2<f64>,
}

impl FluxTerms {
    /// Combine ψ′ with its derivatives, cell by cell.
    pub fn from_derivatives(psi: &Array2<f64>, d: &StreamfunctionDerivatives) -> Self {
        let xu = Zip::from(psi)
            .and(&d.dpsi_dlon)
            .and(&d.d2psi_dlon2)
            .map_collect(|&p, &px, &pxx| px * px - p * pxx);
        let xv = Zip::from(psi)
            .and(&d.dpsi_dlon)
            .and(&d.dpsi_dlat)
            .and(&d.d2psi_dlondlat)
            .map_collect(|&p, &px, &py, &pxy| px * py - p * pxy);
        let yv = Zip::from(psi)
            .and(&d.dpsi_dlat)
            .and(&d.d2psi_dlat2)
            .map_collect(|&p, &py, &pyy| py * py - p * pyy);

        Self { xu, xv, yv }
    }
}
