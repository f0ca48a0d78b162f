//! Synth command: export synthetic survey and climate data as CSV files.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cmpi_io::{
    ClimateSource, SurveySource, write_climate_csv, write_households_csv, write_wards_csv,
};

use crate::cli::SynthArgs;
use crate::config::{self, CmpiConfig};
use crate::convert;

/// Write `wards.csv`, `households.csv` and `climate.csv` into the output
/// directory.
pub fn run(args: SynthArgs) -> Result<()> {
    let _cmd = info_span!("synth").entered();
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => CmpiConfig::default(),
    };
    let seed = args.seed.or(config.seed);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let survey = convert::build_synthetic_survey(&config.survey, seed)?
        .load()
        .context("failed to generate synthetic survey")?;
    let grid = convert::build_synthetic_climate(&config.climate, seed)?
        .load()
        .context("failed to generate synthetic climate")?;

    let wards = args.output.join("wards.csv");
    let households = args.output.join("households.csv");
    let climate = args.output.join("climate.csv");
    write_wards_csv(&wards, &survey.wards)?;
    write_households_csv(&households, &survey.households)?;
    write_climate_csv(&climate, &grid)?;

    info!(
        dir = %args.output.display(),
        wards = survey.wards.len(),
        households = survey.households.len(),
        grid_points = grid.len(),
        "synthetic data exported"
    );
    Ok(())
}
