//! Wave-activity flux from a reanalysis file.
//!
//! Reads u, v and z on one pressure level, averages them over all time
//! steps to form the climatology, computes the flux for one time step and
//! writes it to NetCDF.
//!
//! Run with:
//! ```text
//! RUST_LOG=info cargo run --release --features netcdf --example reanalysis_waf -- \
//!     input.nc [time_index] [output.nc] [level_hpa]
//! ```

use std::env;

use waf_rs::{
    FluxConfig, FluxKernel, FluxStatistics, FluxWriter, FluxWriterConfig, ReanalysisReader,
    WafError,
};

fn main() -> waf_rs::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = args.get(1).ok_or_else(|| {
        WafError::InvalidInput(
            "usage: reanalysis_waf <input.nc> [time_index] [output.nc] [level_hpa]".into(),
        )
    })?;
    let time_index = match args.get(2) {
        Some(s) => s
            .parse::<usize>()
            .map_err(|e| WafError::InvalidInput(format!("time index '{}': {}", s, e)))?,
        None => 2,
    };
    let output = args.get(3).map(String::as_str).unwrap_or("waf.nc");
    let level_hpa = match args.get(4) {
        Some(s) => s
            .parse::<f64>()
            .map_err(|e| WafError::InvalidInput(format!("pressure level '{}': {}", s, e)))?,
        None => 300.0,
    };

    println!("=================================================================");
    println!("  Takaya-Nakamura Wave Activity Flux");
    println!("=================================================================");
    println!("Input:  {}", input);
    println!("Output: {}", output);
    println!();

    let data = ReanalysisReader::from_file(input)?;
    println!("Time steps: {}", data.n_time());

    let grid = data.grid()?;
    println!("Grid: {}", grid.shape());

    let clim = data.climatology()?;
    let phi = data.instant_geopotential(time_index)?;

    let config = FluxConfig::default().with_pressure_level(level_hpa);
    let kernel = FluxKernel::new(grid, config)?;
    let flux = kernel.compute(&clim, &phi)?;

    let stats = FluxStatistics::compute(&flux);
    stats.log();
    println!("Valid cells: {} / singular: {}", stats.n_valid, stats.n_singular);
    for (cause, n) in &stats.singular_by_cause {
        println!("  {:<12} {}", cause.name(), n);
    }
    println!("Max |W|: {:.3e} m²/s²", stats.max_magnitude);

    let writer_config = FluxWriterConfig::new(output)
        .with_title(format!("Wave activity flux, time index {}", time_index))
        .with_source(input.as_str());
    FluxWriter::new(writer_config).write(kernel.grid(), kernel.config(), &flux)?;

    println!("\nWrote {}", output);
    Ok(())
}
