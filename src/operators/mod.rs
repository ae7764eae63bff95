//! Array operators on regular latitude/longitude grids.
//!
//! This module provides:
//! - Finite-difference gradients with an explicit boundary policy
//!   (centred interior, one-sided edges), for 1-D sequences and along
//!   either axis of a 2-D field
//! - Row-wise application of latitude profiles (`f`, `cos φ`) to fields

mod broadcast;
mod differentiation;

pub use broadcast::{div_rows, mul_rows, zip_rows};
pub use differentiation::{axis_spacing, gradient_1d, gradient_along};
