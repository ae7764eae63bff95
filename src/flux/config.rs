//! Physical configuration of the flux computation.

use crate::error::{Result, WafError};
use crate::grid::EARTH_ROTATION_RATE;
use crate::types::PressureLevel;

/// Earth radius a (m).
pub const EARTH_RADIUS: f64 = 6.37e6;

/// Default analysis level (hPa).
pub const DEFAULT_PRESSURE_LEVEL_HPA: f64 = 300.0;

/// Default threshold below which |cos φ|, |f| or |U_c| count as zero.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Constants and level for [`FluxKernel`](super::FluxKernel).
///
/// Everything the kernel needs beyond its input fields is passed here,
/// so the computation has no hidden globals.
///
/// # Example
///
/// ```
/// use waf_rs::flux::FluxConfig;
///
/// let config = FluxConfig::default().with_pressure_level(250.0);
/// assert_eq!(config.pressure_level.hpa(), 250.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluxConfig {
    /// Earth radius a (m).
    pub earth_radius: f64,
    /// Earth rotation rate Ω (rad/s).
    pub omega: f64,
    /// Isobaric analysis level.
    pub pressure_level: PressureLevel,
    /// Cells where |cos φ|, |f| or the wind speed fall at or below this
    /// value are flagged as singular.
    pub singular_tolerance: f64,
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS,
            omega: EARTH_ROTATION_RATE,
            pressure_level: PressureLevel::new(DEFAULT_PRESSURE_LEVEL_HPA),
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl FluxConfig {
    /// Set the Earth radius (m).
    pub fn with_earth_radius(mut self, earth_radius: f64) -> Self {
        self.earth_radius = earth_radius;
        self
    }

    /// Set the rotation rate (rad/s).
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Set the analysis level (hPa).
    pub fn with_pressure_level(mut self, hpa: f64) -> Self {
        self.pressure_level = PressureLevel::new(hpa);
        self
    }

    /// Set the singularity threshold.
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Check that all constants are physically usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.earth_radius.is_finite() && self.earth_radius > 0.0) {
            return Err(WafError::InvalidConfig(format!(
                "earth radius must be positive, got {}",
                self.earth_radius
            )));
        }
        if !(self.omega.is_finite() && self.omega > 0.0) {
            return Err(WafError::InvalidConfig(format!(
                "rotation rate must be positive, got {}",
                self.omega
            )));
        }
        if !self.pressure_level.is_valid() {
            return Err(WafError::InvalidConfig(format!(
                "pressure level must be positive, got {}",
                self.pressure_level.hpa()
            )));
        }
        if !(self.singular_tolerance.is_finite() && self.singular_tolerance >= 0.0) {
            return Err(WafError::InvalidConfig(format!(
                "singular tolerance must be non-negative, got {}",
                self.singular_tolerance
            )));
        }
        Ok(())
    }
}
