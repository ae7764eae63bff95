//! Finite-difference gradients on regular grids.
//!
//! The boundary policy is the standard gradient convention:
//! - interior: centred difference `(f[i+1] - f[i-1]) / (2 d[i])`
//! - first point: forward difference `(f[1] - f[0]) / d[0]`
//! - last point: backward difference `(f[n-1] - f[n-2]) / d[n-1]`
//!
//! `d` is the local spacing at each index, itself the gradient of the
//! coordinate (see [`axis_spacing`]). On a uniform axis every `d[i]` is the
//! grid step, and the stencil reduces to the usual scalar-step gradient.
//! Second derivatives apply the same operator twice.

use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};

/// Local spacing of a coordinate axis.
///
/// Centred `(x[i+1] - x[i-1]) / 2` in the interior, one-sided at both ends.
/// A descending axis yields negative spacings, which keeps derivatives
/// oriented with increasing coordinate.
///
/// # Panics
///
/// Panics if the axis has fewer than 2 points.
pub fn axis_spacing(coords: &[f64]) -> Array1<f64> {
    let n = coords.len();
    assert!(n >= 2, "Axis needs at least 2 points, got {}", n);

    let mut d = Array1::zeros(n);
    d[0] = coords[1] - coords[0];
    d[n - 1] = coords[n - 1] - coords[n - 2];
    for i in 1..n - 1 {
        d[i] = 0.5 * (coords[i + 1] - coords[i - 1]);
    }
    d
}

/// Derivative of a 1-D sequence given the local spacing at each index.
///
/// # Panics
///
/// Panics if `values` and `spacing` differ in length or have fewer than 2 points.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use waf_rs::operators::gradient_1d;
///
/// let f = array![0.0, 1.0, 4.0, 9.0];
/// let d = array![1.0, 1.0, 1.0, 1.0];
/// let df = gradient_1d(f.view(), d.view());
/// assert_eq!(df.to_vec(), vec![1.0, 2.0, 4.0, 5.0]);
/// ```
pub fn gradient_1d(values: ArrayView1<f64>, spacing: ArrayView1<f64>) -> Array1<f64> {
    let mut out = Array1::zeros(values.len());
    gradient_into(values, spacing, out.view_mut());
    out
}

/// In-place variant of [`gradient_1d`] writing into `out`.
fn gradient_into(values: ArrayView1<f64>, spacing: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let n = values.len();
    assert!(n >= 2, "Gradient needs at least 2 points, got {}", n);
    assert_eq!(
        spacing.len(),
        n,
        "Spacing length must match the number of values"
    );

    out[0] = (values[1] - values[0]) / spacing[0];
    out[n - 1] = (values[n - 1] - values[n - 2]) / spacing[n - 1];
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * spacing[i]);
    }
}

/// Derivative of a 2-D field along one axis.
///
/// `axis` follows ndarray numbering: `Axis(0)` runs down the rows
/// (latitude), `Axis(1)` along the columns (longitude). `spacing` must have
/// the length of that axis.
///
/// # Panics
///
/// Panics if `spacing` does not match the axis length or the axis has
/// fewer than 2 points.
pub fn gradient_along(field: &Array2<f64>, axis: Axis, spacing: &Array1<f64>) -> Array2<f64> {
    let mut out = Array2::zeros(field.dim());
    Zip::from(field.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|src, dst| gradient_into(src, spacing.view(), dst));
    out
}
