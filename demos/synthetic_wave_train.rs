//! Wave-activity flux of an idealized stationary wave train.
//!
//! Background: uniform westerly U = 10 m/s, V = 0, Φ_c = 0 on a 2.5° grid
//! from 80°N to 10°N. The perturbation is a zonal wavenumber-5 pattern
//! with a Gaussian envelope centred at 45°N.
//!
//! For a westerly background the zonal flux points eastward wherever the
//! wave is present.
//!
//! Run with: `RUST_LOG=info cargo run --example synthetic_wave_train`

use ndarray::Array2;
use waf_rs::{Climatology, FluxConfig, FluxKernel, FluxStatistics, LatLonGrid};

fn main() -> waf_rs::Result<()> {
    env_logger::init();

    // Parameters
    let wavenumber = 5.0;
    let amplitude = 800.0; // m²/s²
    let centre_lat = 45.0;
    let width_lat = 12.0;

    println!("Synthetic Rossby Wave Train");
    println!("===========================");

    let grid = LatLonGrid::uniform(0.0, 2.5, 144, 80.0, -2.5, 29)?;
    println!("Grid: {}", grid.shape());
    println!("Wavenumber: {}", wavenumber);
    println!();

    let clim = Climatology::uniform(grid.shape().dim(), 10.0, 0.0, 0.0);
    let phi = Array2::from_shape_fn(grid.shape().dim(), |(j, i)| {
        let envelope = (-((grid.lat()[j] - centre_lat) / width_lat).powi(2)).exp();
        amplitude * envelope * (wavenumber * grid.lon()[i].to_radians()).sin()
    });

    let kernel = FluxKernel::new(grid, FluxConfig::default())?;
    let flux = kernel.compute(&clim, &phi)?;

    let stats = FluxStatistics::compute(&flux);
    stats.log();

    println!("Valid cells: {} ({:.1}%)", stats.n_valid, 100.0 * stats.valid_fraction());
    println!("Px range: [{:.3e}, {:.3e}] m²/s²", stats.px.min, stats.px.max);
    println!("Py range: [{:.3e}, {:.3e}] m²/s²", stats.py.min, stats.py.max);
    println!("Mean Px: {:.3e} m²/s²", stats.mean_px);
    println!("Max |W|: {:.3e} m²/s²", stats.max_magnitude);

    // Zonal-mean profile along the wave guide
    println!();
    println!("  lat    <ψ′²>^½ (1e6 m²/s)   <Px> (m²/s²)");
    let psi = flux.psi_scaled(1.0e6);
    for j in (0..kernel.grid().n_lat()).step_by(4) {
        let n = psi.ncols() as f64;
        let rms = (psi.row(j).iter().map(|v| v * v).sum::<f64>() / n).sqrt();
        let mean_px = flux.px.row(j).iter().sum::<f64>() / n;
        println!(
            "{:6.1}    {:12.4}        {:12.4e}",
            kernel.grid().lat()[j],
            rms,
            mean_px
        );
    }

    Ok(())
}
