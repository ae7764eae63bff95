//! NetCDF round trip: synthetic reanalysis file in, flux file out.

#![cfg(feature = "netcdf")]

use ndarray::Array3;
use tempfile::tempdir;
use waf_rs::{FluxConfig, FluxKernel, FluxWriter, FluxWriterConfig, ReanalysisReader};

const N_TIME: usize = 4;
const N_LAT: usize = 13;
const N_LON: usize = 36;

/// Write a packed (time, lat, lon) file the way reanalysis archives do.
fn write_synthetic_input(path: &std::path::Path) {
    let lon: Vec<f64> = (0..N_LON).map(|i| 10.0 * i as f64).collect();
    let lat: Vec<f64> = (0..N_LAT).map(|j| 75.0 - 5.0 * j as f64).collect();
    let time: Vec<f64> = (0..N_TIME).map(|t| 24.0 * t as f64).collect();

    let u = Array3::from_elem((N_TIME, N_LAT, N_LON), 10.0);
    let v = Array3::<f64>::zeros((N_TIME, N_LAT, N_LON));
    let z = Array3::from_shape_fn((N_TIME, N_LAT, N_LON), |(t, _, i)| {
        9.0e4 + 400.0 * (3.0 * (10.0 * i as f64).to_radians() + 0.5 * t as f64).sin()
    });

    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", N_TIME).unwrap();
    file.add_dimension("latitude", N_LAT).unwrap();
    file.add_dimension("longitude", N_LON).unwrap();

    file.add_variable::<f64>("longitude", &["longitude"])
        .unwrap()
        .put_values(&lon, ..)
        .unwrap();
    file.add_variable::<f64>("latitude", &["latitude"])
        .unwrap()
        .put_values(&lat, ..)
        .unwrap();
    file.add_variable::<f64>("time", &["time"])
        .unwrap()
        .put_values(&time, ..)
        .unwrap();

    let dims = ["time", "latitude", "longitude"];
    file.add_variable::<f64>("u", &dims)
        .unwrap()
        .put_values(u.as_slice().unwrap(), ..)
        .unwrap();
    file.add_variable::<f64>("v", &dims)
        .unwrap()
        .put_values(v.as_slice().unwrap(), ..)
        .unwrap();

    // Geopotential packed as z = raw * 2 + 9e4
    let packed: Vec<f64> = z.iter().map(|&val| (val - 9.0e4) / 2.0).collect();
    let mut z_var = file.add_variable::<f64>("z", &dims).unwrap();
    z_var.put_attribute("scale_factor", 2.0).unwrap();
    z_var.put_attribute("add_offset", 9.0e4).unwrap();
    z_var.put_values(&packed, ..).unwrap();
}

#[test]
fn test_read_unpacks_and_averages() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.nc");
    write_synthetic_input(&path);

    let data = ReanalysisReader::from_file(&path).unwrap();
    assert_eq!(data.n_time(), N_TIME);
    assert_eq!(data.z.dim(), (N_TIME, N_LAT, N_LON));

    let expected = 9.0e4 + 400.0 * (3.0 * 20.0_f64.to_radians() + 0.5).sin();
    assert!((data.z[[1, 4, 2]] - expected).abs() < 1e-6);

    let grid = data.grid().unwrap();
    assert!(grid.is_lat_descending());
    let clim = data.climatology().unwrap();
    assert!((clim.u()[[3, 3]] - 10.0).abs() < 1e-12);

    assert!(data.instant_geopotential(N_TIME).is_err());
}

#[test]
fn test_flux_file_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.nc");
    let output = dir.path().join("waf.nc");
    write_synthetic_input(&input);

    let data = ReanalysisReader::from_file(&input).unwrap();
    let kernel = FluxKernel::new(data.grid().unwrap(), FluxConfig::default()).unwrap();
    let flux = kernel
        .compute(
            &data.climatology().unwrap(),
            &data.instant_geopotential(2).unwrap(),
        )
        .unwrap();

    FluxWriter::new(
        FluxWriterConfig::new(output.to_string_lossy())
            .with_title("round trip")
            .with_source("synthetic"),
    )
    .write(kernel.grid(), kernel.config(), &flux)
    .unwrap();

    let file = netcdf::open(&output).unwrap();
    for name in ["lat", "lon", "psi", "px", "py", "singular"] {
        assert!(file.variable(name).is_some(), "missing {}", name);
    }

    let py: Vec<f32> = file.variable("py").unwrap().get_values(..).unwrap();
    let mask: Vec<u8> = file.variable("singular").unwrap().get_values(..).unwrap();
    assert_eq!(py.len(), N_LAT * N_LON);
    assert!(mask.iter().all(|&m| m == 0));
    let expected = flux.py[[6, 7]];
    assert!((py[6 * N_LON + 7] as f64 - expected).abs() <= 1e-6 * expected.abs() + 1e-20);
}
