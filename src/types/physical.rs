//! Physical quantity newtypes.
//!
//! These types prevent mixing up quantities that share the
//! same underlying type (f64).

use std::fmt;

// =============================================================================
// PressureLevel (isobaric surface, hPa)
// =============================================================================

/// Pressure of the isobaric analysis surface, in hectopascals.
///
/// The flux coefficient uses the level normalised by 1000 hPa,
/// see [`PressureLevel::normalized`].
///
/// # Example
///
/// ```
/// use waf_rs::types::PressureLevel;
///
/// let p = PressureLevel::new(300.0);
/// assert_eq!(p.hpa(), 300.0);
/// assert!((p.normalized() - 0.3).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct PressureLevel(f64);

impl PressureLevel {
    /// Reference pressure used to normalise the level (hPa).
    pub const REFERENCE_HPA: f64 = 1000.0;

    /// Upper-tropospheric level used for stationary Rossby wave trains.
    pub const UPPER_TROPOSPHERE: Self = Self(300.0);

    /// Create a new pressure level.
    ///
    /// No validation happens here; see [`PressureLevel::is_valid`].
    #[inline]
    pub const fn new(hpa: f64) -> Self {
        Self(hpa)
    }

    /// Get the level in hPa.
    #[inline]
    pub fn hpa(self) -> f64 {
        self.0
    }

    /// Level in Pa.
    #[inline]
    pub fn pascals(self) -> f64 {
        self.0 * 100.0
    }

    /// p = p_lev / 1000 hPa, the dimensionless factor of the flux coefficient.
    #[inline]
    pub fn normalized(self) -> f64 {
        self.0 / Self::REFERENCE_HPA
    }

    /// True if the level is a usable positive, finite pressure.
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Default for PressureLevel {
    fn default() -> Self {
        Self::UPPER_TROPOSPHERE
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} hPa", self.0)
    }
}

impl From<PressureLevel> for f64 {
    #[inline]
    fn from(p: PressureLevel) -> f64 {
        p.0
    }
}
