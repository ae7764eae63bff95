//! Latitude/longitude grid shape.

use std::fmt;

/// Shape of a field on a regular latitude/longitude grid.
///
/// Rows are latitudes, columns are longitudes, matching the
/// `(n_lat, n_lon)` layout of every 2-D field in this crate.
///
/// # Example
///
/// ```
/// use waf_rs::types::FieldShape;
///
/// let shape = FieldShape::new(181, 360);
/// assert_eq!(shape.n_lat(), 181);
/// assert_eq!(shape.n_lon(), 360);
/// assert_eq!(shape.dim(), (181, 360));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldShape {
    /// Number of latitude rows
    n_lat: usize,
    /// Number of longitude columns
    n_lon: usize,
}

impl FieldShape {
    /// Create a new field shape.
    pub fn new(n_lat: usize, n_lon: usize) -> Self {
        Self { n_lat, n_lon }
    }

    /// Number of latitude rows.
    #[inline]
    pub fn n_lat(&self) -> usize {
        self.n_lat
    }

    /// Number of longitude columns.
    #[inline]
    pub fn n_lon(&self) -> usize {
        self.n_lon
    }

    /// Total number of grid cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_lat * self.n_lon
    }

    /// Return as `(rows, cols)`, the ndarray dimension tuple.
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        (self.n_lat, self.n_lon)
    }

    /// True if an array dimension matches this shape.
    #[inline]
    pub fn matches(&self, dim: (usize, usize)) -> bool {
        self.dim() == dim
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lat x {} lon", self.n_lat, self.n_lon)
    }
}

impl From<(usize, usize)> for FieldShape {
    fn from((n_lat, n_lon): (usize, usize)) -> Self {
        Self::new(n_lat, n_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_matches_dim() {
        let shape = FieldShape::new(3, 5);
        assert!(shape.matches((3, 5)));
        assert!(!shape.matches((5, 3)));
        assert_eq!(shape.n_cells(), 15);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", FieldShape::from((73, 144))), "73 lat x 144 lon");
    }
}
