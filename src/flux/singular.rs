//! Singular-cell masking.
//!
//! The flux coefficient divides by cos φ and by the background wind speed,
//! and the streamfunction divides by f. At the poles, on the equator and in
//! calm wind these divisions blow up. Such cells are physical
//! singularities, not failures: they are recorded here, their flux values
//! are set to NaN, and the rest of the grid is computed normally.

use ndarray::Array2;

/// Why a grid cell has no defined flux.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Singularity {
    /// |cos φ| at or below tolerance.
    Pole,
    /// |f| at or below tolerance; ψ′ is undefined.
    Equator,
    /// Background wind speed at or below tolerance.
    CalmWind,
    /// Any other non-finite result, e.g. missing input data.
    NonFinite,
}

impl Singularity {
    /// All causes, in reporting order.
    pub const ALL: [Singularity; 4] = [
        Singularity::Pole,
        Singularity::Equator,
        Singularity::CalmWind,
        Singularity::NonFinite,
    ];

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Singularity::Pole => "pole",
            Singularity::Equator => "equator",
            Singularity::CalmWind => "calm_wind",
            Singularity::NonFinite => "non_finite",
        }
    }
}

/// Per-cell record of singular cells on a `(n_lat, n_lon)` grid.
///
/// # Example
///
/// ```
/// use waf_rs::flux::{SingularMask, Singularity};
///
/// let mut mask = SingularMask::none((2, 3));
/// mask.flag(0, 1, Singularity::CalmWind);
/// assert!(mask.is_singular(0, 1));
/// assert_eq!(mask.count(), 1);
/// assert_eq!(mask.count_of(Singularity::Pole), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SingularMask {
    cells: Array2<Option<Singularity>>,
}

impl SingularMask {
    /// Mask with no flagged cells.
    pub fn none(dim: (usize, usize)) -> Self {
        Self {
            cells: Array2::from_elem(dim, None),
        }
    }

    /// Flag cell `(row, col)`. The first recorded cause is kept.
    pub fn flag(&mut self, row: usize, col: usize, cause: Singularity) {
        let cell = &mut self.cells[[row, col]];
        if cell.is_none() {
            *cell = Some(cause);
        }
    }

    /// True if the cell is flagged.
    #[inline]
    pub fn is_singular(&self, row: usize, col: usize) -> bool {
        self.cells[[row, col]].is_some()
    }

    /// Cause recorded for the cell, if any.
    #[inline]
    pub fn cause(&self, row: usize, col: usize) -> Option<Singularity> {
        self.cells[[row, col]]
    }

    /// Total number of flagged cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of cells flagged with `cause`.
    pub fn count_of(&self, cause: Singularity) -> usize {
        self.cells.iter().filter(|&&c| c == Some(cause)).count()
    }

    /// True if no cell is flagged.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Mask shape.
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Boolean view: `true` where the flux is undefined.
    pub fn to_bool(&self) -> Array2<bool> {
        self.cells.map(Option::is_some)
    }

    /// Iterate over flagged cells as `((row, col), cause)`.
    pub fn flagged(&self) -> impl Iterator<Item = ((usize, usize), Singularity)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|(idx, c)| c.map(|cause| (idx, cause)))
    }

    /// Log a warning summarising flagged cells by cause.
    pub(crate) fn log_summary(&self) {
        let total = self.count();
        if total == 0 {
            return;
        }
        let breakdown: Vec<String> = Singularity::ALL
            .iter()
            .filter_map(|&cause| {
                let n = self.count_of(cause);
                (n > 0).then(|| format!("{}={}", cause.name(), n))
            })
            .collect();
        log::warn!(
            "{} of {} cells have undefined flux ({})",
            total,
            self.cells.len(),
            breakdown.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cause_wins() {
        let mut mask = SingularMask::none((2, 2));
        mask.flag(1, 0, Singularity::Equator);
        mask.flag(1, 0, Singularity::NonFinite);
        assert_eq!(mask.cause(1, 0), Some(Singularity::Equator));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_counts_and_iteration() {
        let mut mask = SingularMask::none((3, 3));
        assert!(mask.is_clear());

        mask.flag(0, 0, Singularity::Pole);
        mask.flag(0, 1, Singularity::Pole);
        mask.flag(2, 2, Singularity::CalmWind);

        assert_eq!(mask.count(), 3);
        assert_eq!(mask.count_of(Singularity::Pole), 2);
        assert_eq!(mask.count_of(Singularity::CalmWind), 1);
        assert!(!mask.is_clear());

        let flagged: Vec<_> = mask.flagged().collect();
        assert_eq!(flagged[2], ((2, 2), Singularity::CalmWind));

        let as_bool = mask.to_bool();
        assert!(as_bool[[0, 1]]);
        assert!(!as_bool[[1, 1]]);
    }
}
