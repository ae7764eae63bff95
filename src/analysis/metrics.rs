//! Summary statistics of a computed flux field.
//!
//! Statistics are taken over valid (unflagged, finite) cells only.

use crate::flux::{Singularity, WaveActivityFlux};

/// Range of a field over valid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRange {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl FieldRange {
    fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// max - min, or 0 when nothing was included.
    pub fn span(&self) -> f64 {
        if self.max >= self.min {
            self.max - self.min
        } else {
            0.0
        }
    }
}

/// Domain statistics of a [`WaveActivityFlux`].
#[derive(Clone, Debug)]
pub struct FluxStatistics {
    /// Cells with a defined flux
    pub n_valid: usize,
    /// Cells flagged as singular
    pub n_singular: usize,
    /// Flagged cells per cause
    pub singular_by_cause: Vec<(Singularity, usize)>,
    /// Range of ψ′ (m²/s) over finite cells
    pub psi: FieldRange,
    /// Range of Px (m²/s²)
    pub px: FieldRange,
    /// Range of Py (m²/s²)
    pub py: FieldRange,
    /// Mean Px over valid cells
    pub mean_px: f64,
    /// Mean Py over valid cells
    pub mean_py: f64,
    /// Maximum |W| = sqrt(Px² + Py²)
    pub max_magnitude: f64,
    /// Mean |W|
    pub mean_magnitude: f64,
}

impl FluxStatistics {
    /// Compute statistics over the valid cells of `flux`.
    pub fn compute(flux: &WaveActivityFlux) -> Self {
        let mut psi = FieldRange::empty();
        let mut px = FieldRange::empty();
        let mut py = FieldRange::empty();
        let mut sum_px = 0.0;
        let mut sum_py = 0.0;
        let mut sum_mag = 0.0;
        let mut max_magnitude: f64 = 0.0;
        let mut n_valid = 0;

        for &v in flux.psi.iter().filter(|v| v.is_finite()) {
            psi.include(v);
        }

        for ((idx, &x), &y) in flux.px.indexed_iter().zip(flux.py.iter()) {
            if flux.mask.is_singular(idx.0, idx.1) || !x.is_finite() || !y.is_finite() {
                continue;
            }
            px.include(x);
            py.include(y);
            sum_px += x;
            sum_py += y;
            let mag = x.hypot(y);
            sum_mag += mag;
            max_magnitude = max_magnitude.max(mag);
            n_valid += 1;
        }

        let mean = |sum: f64| if n_valid > 0 { sum / n_valid as f64 } else { 0.0 };

        let singular_by_cause = Singularity::ALL
            .iter()
            .map(|&cause| (cause, flux.mask.count_of(cause)))
            .filter(|&(_, n)| n > 0)
            .collect();

        Self {
            n_valid,
            n_singular: flux.mask.count(),
            singular_by_cause,
            psi,
            px,
            py,
            mean_px: mean(sum_px),
            mean_py: mean(sum_py),
            max_magnitude,
            mean_magnitude: mean(sum_mag),
        }
    }

    /// Fraction of cells with a defined flux.
    pub fn valid_fraction(&self) -> f64 {
        let total = self.n_valid + self.n_singular;
        if total == 0 {
            0.0
        } else {
            self.n_valid as f64 / total as f64
        }
    }

    /// Log the statistics at info level.
    pub fn log(&self) {
        log::info!(
            "WAF: {} valid / {} singular cells, |W| max {:.3e} mean {:.3e} m²/s²",
            self.n_valid,
            self.n_singular,
            self.max_magnitude,
            self.mean_magnitude
        );
        log::info!(
            "     ψ′ in [{:.3e}, {:.3e}] m²/s, mean (Px, Py) = ({:.3e}, {:.3e})",
            self.psi.min,
            self.psi.max,
            self.mean_px,
            self.mean_py
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::SingularMask;
    use ndarray::array;

    fn sample_flux() -> WaveActivityFlux {
        let mut mask = SingularMask::none((2, 2));
        mask.flag(1, 1, Singularity::CalmWind);
        WaveActivityFlux {
            psi: array![[1.0e6, -2.0e6], [f64::NAN, 4.0e6]],
            px: array![[3.0, 0.0], [-3.0, f64::NAN]],
            py: array![[4.0, 1.0], [0.0, f64::NAN]],
            mask,
        }
    }

    #[test]
    fn test_statistics_skip_singular_cells() {
        let stats = FluxStatistics::compute(&sample_flux());

        assert_eq!(stats.n_valid, 3);
        assert_eq!(stats.n_singular, 1);
        assert_eq!(stats.singular_by_cause, vec![(Singularity::CalmWind, 1)]);
        assert_eq!(stats.max_magnitude, 5.0);
        assert!((stats.mean_magnitude - 3.0).abs() < 1e-12);
        assert_eq!(stats.mean_px, 0.0);
        assert!((stats.mean_py - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.px, FieldRange { min: -3.0, max: 3.0 });
        assert_eq!(stats.psi.min, -2.0e6);
        assert_eq!(stats.psi.max, 4.0e6);
        assert!((stats.valid_fraction() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_range_span() {
        assert_eq!(FieldRange::empty().span(), 0.0);
    }
}
