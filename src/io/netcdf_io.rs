//! NetCDF I/O for reanalysis input and flux output.
//!
//! # Reader
//!
//! [`ReanalysisReader`] loads pressure-level wind and geopotential from
//! ERA-Interim, ERA5 or similar files:
//! - coordinates `longitude`/`lon`, `latitude`/`lat`, `time`
//! - `u`, `v`, `z` shaped `(time, lat, lon)`, or `(time, level, lat, lon)`
//!   with the level chosen by index
//!
//! Packed variables are unpacked with `scale_factor`/`add_offset`, and
//! `_FillValue`/`missing_value` entries become NaN.
//!
//! # Writer
//!
//! [`FluxWriter`] writes ψ′, Px, Py and the singular-cell mask on the
//! lat/lon grid following CF-1.8 conventions.
//!
//! # Example
//!
//! ```rust,ignore
//! use waf_rs::flux::{FluxConfig, FluxKernel};
//! use waf_rs::io::{FluxWriter, FluxWriterConfig, ReanalysisReader};
//!
//! let data = ReanalysisReader::from_file("1979_2017_1.nc")?;
//! let kernel = FluxKernel::new(data.grid()?, FluxConfig::default())?;
//! let flux = kernel.compute(&data.climatology()?, &data.instant_geopotential(2)?)?;
//!
//! FluxWriter::new(FluxWriterConfig::new("waf.nc").with_title("January 1981"))
//!     .write(kernel.grid(), kernel.config(), &flux)?;
//! ```

use std::path::Path;

use chrono::Utc;
use ndarray::{Array2, Array3};
use thiserror::Error;

use crate::climatology::{Climatology, time_slice};
use crate::flux::{FluxConfig, WaveActivityFlux};
use crate::grid::LatLonGrid;

/// Error type for NetCDF operations.
#[derive(Debug, Error)]
pub enum NetCDFError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// NetCDF library error
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Missing variable
    #[error("Missing variable: {0}")]
    MissingVariable(String),
}

/// Fill value for missing data (CF-conventions standard).
pub const FILL_VALUE_F64: f64 = 9.96920996838687e+36;
pub const FILL_VALUE_F32: f32 = 9.96921e+36;

/// Check if a value is valid (not a fill value).
#[inline]
pub fn is_valid_f64(v: f64) -> bool {
    v.is_finite() && v.abs() < 1.0e+30
}

// ============================================================================
// Reader
// ============================================================================

/// Pressure-level reanalysis fields on a regular lat/lon grid.
#[derive(Debug, Clone)]
pub struct ReanalysisReader {
    /// Longitudes (degrees)
    pub lon: Vec<f64>,
    /// Latitudes (degrees)
    pub lat: Vec<f64>,
    /// Time coordinate, in the file's units
    pub time: Vec<f64>,
    /// Zonal wind (m/s), `(time, lat, lon)`
    pub u: Array3<f64>,
    /// Meridional wind (m/s), `(time, lat, lon)`
    pub v: Array3<f64>,
    /// Geopotential (m²/s²), `(time, lat, lon)`
    pub z: Array3<f64>,
}

impl ReanalysisReader {
    /// Load a single-level file, or level 0 of a multi-level file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NetCDFError> {
        Self::from_file_at_level(path, 0)
    }

    /// Load the fields at `level_index` of a `(time, level, lat, lon)` file.
    ///
    /// The index is ignored for 3-D variables.
    pub fn from_file_at_level(
        path: impl AsRef<Path>,
        level_index: usize,
    ) -> Result<Self, NetCDFError> {
        let path = path.as_ref();
        let file = netcdf::open(path)?;

        let lon = Self::read_coord(&file, &["longitude", "lon"])?;
        let lat = Self::read_coord(&file, &["latitude", "lat"])?;
        let time = Self::read_coord(&file, &["time"])?;
        let shape = (time.len(), lat.len(), lon.len());

        let u = Self::read_field(&file, &["u", "ua", "uwnd"], level_index, shape)?;
        let v = Self::read_field(&file, &["v", "va", "vwnd"], level_index, shape)?;
        let z = Self::read_field(&file, &["z", "zg", "geopotential"], level_index, shape)?;

        log::info!(
            "Read {} time steps on {} x {} grid from {}",
            shape.0,
            shape.1,
            shape.2,
            path.display()
        );

        Ok(Self {
            lon,
            lat,
            time,
            u,
            v,
            z,
        })
    }

    /// Number of time steps.
    pub fn n_time(&self) -> usize {
        self.time.len()
    }

    /// Validated grid built from the coordinate variables.
    pub fn grid(&self) -> crate::Result<LatLonGrid> {
        LatLonGrid::new(self.lon.clone(), self.lat.clone())
    }

    /// Time-mean background over every step in the file.
    pub fn climatology(&self) -> crate::Result<Climatology> {
        Climatology::from_time_series(&self.u, &self.v, &self.z)
    }

    /// Geopotential at time step `index`.
    pub fn instant_geopotential(&self, index: usize) -> crate::Result<Array2<f64>> {
        time_slice(&self.z, index)
    }

    /// Read a coordinate variable.
    fn read_coord(file: &netcdf::File, names: &[&str]) -> Result<Vec<f64>, NetCDFError> {
        for name in names {
            if let Some(var) = file.variable(name) {
                let data: Vec<f64> = var.get_values(..)?;
                return Ok(data);
            }
        }
        Err(NetCDFError::MissingVariable(names.join(" or ")))
    }

    /// Read a 3-D field, or one level of a 4-D field, unpacking and masking.
    fn read_field(
        file: &netcdf::File,
        names: &[&str],
        level_index: usize,
        shape: (usize, usize, usize),
    ) -> Result<Array3<f64>, NetCDFError> {
        for name in names {
            let Some(var) = file.variable(name) else {
                continue;
            };

            let scale = attribute_f64(&var, "scale_factor").unwrap_or(1.0);
            let offset = attribute_f64(&var, "add_offset").unwrap_or(0.0);
            let fill = attribute_f64(&var, "_FillValue");
            let missing = attribute_f64(&var, "missing_value");

            let raw: Vec<f64> = match var.dimensions().len() {
                3 => var.get_values(..)?,
                4 => {
                    let n_level = var.dimensions()[1].len();
                    if level_index >= n_level {
                        return Err(NetCDFError::InvalidData(format!(
                            "level index {} out of range for {} levels in '{}'",
                            level_index, n_level, name
                        )));
                    }
                    var.get_values((.., level_index, .., ..))?
                }
                n => {
                    return Err(NetCDFError::InvalidData(format!(
                        "'{}' has {} dimensions, expected 3 or 4",
                        name, n
                    )));
                }
            };

            let unpacked: Vec<f64> = raw
                .into_iter()
                .map(|val| {
                    let is_fill =
                        fill.is_some_and(|f| val == f) || missing.is_some_and(|m| val == m);
                    if is_fill || !is_valid_f64(val) {
                        f64::NAN
                    } else {
                        val * scale + offset
                    }
                })
                .collect();

            return Array3::from_shape_vec(shape, unpacked).map_err(|e| {
                NetCDFError::InvalidData(format!("'{}' does not match the grid: {}", name, e))
            });
        }
        Err(NetCDFError::MissingVariable(names.join(" or ")))
    }
}

/// Numeric attribute as f64, if present.
fn attribute_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Double(d) => Some(d),
            netcdf::AttributeValue::Float(f) => Some(f as f64),
            netcdf::AttributeValue::Short(s) => Some(s as f64),
            netcdf::AttributeValue::Int(i) => Some(i as f64),
            _ => None,
        })
}

// ============================================================================
// Writer
// ============================================================================

/// Configuration for flux output.
#[derive(Debug, Clone)]
pub struct FluxWriterConfig {
    /// Output file path
    pub path: String,
    /// Title attribute (CF-conventions)
    pub title: Option<String>,
    /// Institution attribute
    pub institution: Option<String>,
    /// Source attribute (input data description)
    pub source: Option<String>,
    /// Comment attribute
    pub comment: Option<String>,
}

impl FluxWriterConfig {
    /// Create a new configuration with the given output path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            institution: None,
            source: None,
            comment: None,
        }
    }

    /// Set the title attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the institution attribute.
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Set the source attribute.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the comment attribute.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Writes a [`WaveActivityFlux`] to a CF-1.8 NetCDF file.
#[derive(Debug, Clone)]
pub struct FluxWriter {
    config: FluxWriterConfig,
}

impl FluxWriter {
    /// Create a writer.
    pub fn new(config: FluxWriterConfig) -> Self {
        Self { config }
    }

    /// Write grid, ψ′, Px, Py and the singular mask.
    pub fn write(
        &self,
        grid: &LatLonGrid,
        flux_config: &FluxConfig,
        flux: &WaveActivityFlux,
    ) -> Result<(), NetCDFError> {
        if flux.dim() != grid.shape().dim() {
            return Err(NetCDFError::InvalidData(format!(
                "flux shape {:?} does not match grid {}",
                flux.dim(),
                grid.shape()
            )));
        }

        let mut file = netcdf::create(&self.config.path)?;

        file.add_dimension("lat", grid.n_lat())?;
        file.add_dimension("lon", grid.n_lon())?;

        {
            let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
            lat_var.put_attribute("standard_name", "latitude")?;
            lat_var.put_attribute("long_name", "latitude")?;
            lat_var.put_attribute("units", "degrees_north")?;
            lat_var.put_values(grid.lat(), ..)?;
        }

        {
            let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
            lon_var.put_attribute("standard_name", "longitude")?;
            lon_var.put_attribute("long_name", "longitude")?;
            lon_var.put_attribute("units", "degrees_east")?;
            lon_var.put_values(grid.lon(), ..)?;
        }

        Self::put_field(
            &mut file,
            "psi",
            "perturbation geostrophic streamfunction",
            "m2 s-1",
            &flux.psi,
        )?;
        Self::put_field(
            &mut file,
            "px",
            "zonal wave activity flux",
            "m2 s-2",
            &flux.px,
        )?;
        Self::put_field(
            &mut file,
            "py",
            "meridional wave activity flux",
            "m2 s-2",
            &flux.py,
        )?;

        {
            let mask: Vec<u8> = flux.mask.to_bool().iter().map(|&s| u8::from(s)).collect();
            let mut mask_var = file.add_variable::<u8>("singular", &["lat", "lon"])?;
            mask_var.put_attribute("long_name", "flux undefined (pole, equator, calm wind)")?;
            mask_var.put_attribute("flag_values", "0 1")?;
            mask_var.put_attribute("flag_meanings", "valid singular")?;
            mask_var.put_values(&mask, ..)?;
        }

        file.add_attribute("Conventions", "CF-1.8")?;
        file.add_attribute("pressure_level_hPa", flux_config.pressure_level.hpa())?;
        file.add_attribute("earth_radius_m", flux_config.earth_radius)?;
        file.add_attribute("earth_rotation_rate_rad_s", flux_config.omega)?;
        file.add_attribute(
            "references",
            "Takaya and Nakamura (2001), J. Atmos. Sci. 58, 608-627, Eq. 38",
        )?;

        if let Some(ref title) = self.config.title {
            file.add_attribute("title", title.as_str())?;
        }
        if let Some(ref institution) = self.config.institution {
            file.add_attribute("institution", institution.as_str())?;
        }
        if let Some(ref source) = self.config.source {
            file.add_attribute("source", source.as_str())?;
        }
        if let Some(ref comment) = self.config.comment {
            file.add_attribute("comment", comment.as_str())?;
        }

        let now = Utc::now();
        file.add_attribute(
            "history",
            format!("{}: Created by waf-rs", now.format("%Y-%m-%d %H:%M:%S UTC")).as_str(),
        )?;

        log::info!("Wrote wave-activity flux to {}", self.config.path);
        Ok(())
    }

    /// Add a `(lat, lon)` f32 variable, NaN stored as `_FillValue`.
    fn put_field(
        file: &mut netcdf::FileMut,
        name: &str,
        long_name: &str,
        units: &str,
        data: &Array2<f64>,
    ) -> Result<(), NetCDFError> {
        let values: Vec<f32> = data
            .iter()
            .map(|&v| if v.is_finite() { v as f32 } else { FILL_VALUE_F32 })
            .collect();

        let mut var = file.add_variable::<f32>(name, &["lat", "lon"])?;
        var.put_attribute("long_name", long_name)?;
        var.put_attribute("units", units)?;
        var.put_attribute("_FillValue", FILL_VALUE_F32)?;
        var.put_values(&values, ..)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::FluxKernel;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_back_flux() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("waf.nc");

        let grid = LatLonGrid::uniform(0.0, 10.0, 36, 80.0, -10.0, 9).unwrap();
        let kernel = FluxKernel::new(grid.clone(), FluxConfig::default()).unwrap();
        let clim = Climatology::uniform(grid.shape().dim(), 10.0, 0.0, 0.0);
        let phi = Array2::from_shape_fn(grid.shape().dim(), |(_, i)| {
            300.0 * (2.0 * (10.0 * i as f64).to_radians()).sin()
        });
        let flux = kernel.compute(&clim, &phi).unwrap();

        FluxWriter::new(FluxWriterConfig::new(path.to_string_lossy()).with_title("test"))
            .write(&grid, kernel.config(), &flux)
            .unwrap();

        let file = netcdf::open(&path).unwrap();
        let px: Vec<f32> = file.variable("px").unwrap().get_values(..).unwrap();
        let lat: Vec<f64> = file.variable("lat").unwrap().get_values(..).unwrap();
        assert_eq!(px.len(), 9 * 36);
        assert_eq!(lat, grid.lat().to_vec());
        assert!((px[4 * 36 + 5] as f64 - flux.px[[4, 5]]).abs() <= 1e-6 * flux.px[[4, 5]].abs());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(ReanalysisReader::from_file("/nonexistent/waf_input.nc").is_err());
    }
}
