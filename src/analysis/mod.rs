//! Analysis of computed flux fields.
//!
//! - [`FluxStatistics`]: valid/singular cell counts, component ranges,
//!   domain-mean flux and magnitude

mod metrics;

pub use metrics::{FieldRange, FluxStatistics};
