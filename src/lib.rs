//! # waf-rs
//!
//! Horizontal wave-activity flux of Takaya and Nakamura (2001) for
//! stationary Rossby waves on an isobaric surface.
//!
//! Given a time-mean background (U, V, Φ_c) and an instantaneous
//! geopotential Φ on a regular latitude/longitude grid, the crate computes
//! - the perturbation streamfunction ψ′ = (Φ − Φ_c)/f
//! - its first and second derivatives in longitude and latitude
//! - the flux components (Px, Py) in m²/s²
//!
//! Cells where the flux coefficient is undefined (poles, the equator,
//! calm background wind) are reported in a [`SingularMask`] rather than
//! propagated as silent NaN/inf.
//!
//! Building blocks:
//! - [`grid`]: coordinate axes and precomputed metric terms
//! - [`operators`]: finite-difference gradients and row broadcasting
//! - [`climatology`]: background state and time averaging
//! - [`flux`]: the flux kernel
//! - [`analysis`]: domain statistics of a result
//! - [`io`]: NetCDF reanalysis input and flux output (`netcdf` feature)

pub mod analysis;
pub mod climatology;
pub mod error;
pub mod flux;
pub mod grid;
pub mod io;
pub mod operators;
pub mod types;

// Re-export main types for convenience
pub use analysis::{FieldRange, FluxStatistics};
pub use climatology::{Climatology, time_mean, time_slice};
pub use error::{GridAxis, Result, WafError};
pub use flux::{
    DEFAULT_PRESSURE_LEVEL_HPA, DEFAULT_SINGULAR_TOLERANCE, EARTH_RADIUS, FluxConfig, FluxKernel,
    FluxTerms, SingularMask, Singularity, StreamfunctionDerivatives, WaveActivityFlux,
};
pub use grid::{EARTH_ROTATION_RATE, GridMetrics, LatLonGrid, coriolis_parameter};
pub use types::{FieldShape, PressureLevel};

#[cfg(feature = "netcdf")]
pub use io::{FluxWriter, FluxWriterConfig, NetCDFError, ReanalysisReader};
