//! Gridded data I/O.
//!
//! - **Reanalysis input**: pressure-level u, v and geopotential from NetCDF
//! - **Flux output**: CF-conventions NetCDF with ψ′, Px, Py and the singular mask
//!
//! Both require the `netcdf` feature.

#[cfg(feature = "netcdf")]
mod netcdf_io;

#[cfg(feature = "netcdf")]
pub use netcdf_io::{
    FILL_VALUE_F32, FILL_VALUE_F64, FluxWriter, FluxWriterConfig, NetCDFError, ReanalysisReader,
    is_valid_f64,
};
