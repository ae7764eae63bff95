//! Horizontal wave-activity flux.
//!
//! Provides the Takaya–Nakamura (2001) flux pipeline on an isobaric surface:
//! - [`FluxConfig`]: Earth radius, rotation rate, pressure level, singularity threshold
//! - [`StreamfunctionDerivatives`]: first and second partials of ψ′
//! - [`FluxTerms`]: the quadratic terms termXU, termXV, termYV
//! - [`FluxKernel`]: ψ′ and (Px, Py) for one field or a time series
//! - [`SingularMask`]: cells where the flux is undefined, with the cause
//!
//! # Pipeline
//!
//! ```text
//! Φ, Φ_c ──► ψ′ = (Φ − Φ_c)/f ──► ∂ψ′ ──► terms ──► (Px, Py)
//!                                                  ▲
//!                         U_c, V_c, cos φ, p ──────┘
//! ```

mod config;
mod kernel;
mod series;
mod singular;
mod terms;

pub use config::{
    DEFAULT_PRESSURE_LEVEL_HPA, DEFAULT_SINGULAR_TOLERANCE, EARTH_RADIUS, FluxConfig,
};
pub use kernel::{FluxKernel, WaveActivityFlux};
pub use singular::{SingularMask, Singularity};
pub use terms::{FluxTerms, StreamfunctionDerivatives};
