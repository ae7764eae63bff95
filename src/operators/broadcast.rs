//! Row-wise broadcasting of latitude-dependent profiles.
//!
//! Quantities such as the Coriolis parameter or cos(latitude) depend only
//! on the row (latitude) index. These helpers apply such a 1-D profile
//! across every column of a `(n_lat, n_lon)` field, so the alignment is
//! explicit and a column-wise broadcast cannot happen by accident.

use ndarray::{Array1, Array2, Zip};

/// Apply `op(value, profile[row])` to every cell of `field`.
///
/// # Panics
///
/// Panics if the profile length differs from the number of rows.
pub fn zip_rows<F>(field: &Array2<f64>, profile: &Array1<f64>, op: F) -> Array2<f64>
where
    F: Fn(f64, f64) -> f64,
{
    assert_eq!(
        field.nrows(),
        profile.len(),
        "Row profile length must equal the number of rows"
    );

    let mut out = Array2::zeros(field.dim());
    Zip::from(out.rows_mut())
        .and(field.rows())
        .and(profile)
        .for_each(|mut dst, src, &p| {
            Zip::from(&mut dst).and(&src).for_each(|d, &s| *d = op(s, p));
        });
    out
}

/// Multiply each row of `field` by the matching profile value.
pub fn mul_rows(field: &Array2<f64>, profile: &Array1<f64>) -> Array2<f64> {
    zip_rows(field, profile, |v, p| v * p)
}

/// Divide each row of `field` by the matching profile value.
///
/// Division by zero follows IEEE semantics; callers flag the affected rows.
pub fn div_rows(field: &Array2<f64>, profile: &Array1<f64>) -> Array2<f64> {
    zip_rows(field, profile, |v, p| v / p)
}
