//! Run command: load data, compute standard and adjusted MPI, write the
//! comparison report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cmpi_cells::{AssembleConfig, ComparisonReport, assemble_cells, compare, compute_adjusted_mpi};

use crate::cli::RunArgs;
use crate::config;
use crate::convert;
use crate::sources;

const DEFAULT_REPORT: &str = "cmpi_report.json";

/// Run the full pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    // 1. Load project TOML and apply CLI overrides
    let mut config = config::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.synthetic {
        config.climate.source = "synthetic".to_string();
        config.survey.source = "synthetic".to_string();
    }
    let output = args
        .output
        .or(config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT));

    // 2. Build crate configs
    let harshness = convert::build_harshness_config(&config.harshness)?;
    let mpi_cfg = convert::build_mpi_config(&config.mpi)?;
    let weights = convert::build_weights(&config.mpi)?;
    let rules = convert::build_rules(&config.mpi)?;

    // 3. Load data
    let climate = sources::climate_source(&config.climate, config.seed)?;
    let grid = climate
        .load()
        .with_context(|| format!("failed to load climate from {} source", climate.name()))?;
    let survey = sources::survey_source(&config.survey, config.seed)?;
    let data = survey
        .load()
        .with_context(|| format!("failed to load survey from {} source", survey.name()))?;
    info!(
        grid_points = grid.len(),
        wards = data.wards.len(),
        households = data.households.len(),
        "data loaded"
    );

    // 4. Assemble cells and compute both indices
    let specs = data.cell_specs().context("invalid ward record")?;
    let cells = assemble_cells(
        specs,
        data.households,
        &grid,
        &AssembleConfig::default().with_harshness(harshness),
    )
    .context("failed to assemble cells")?;
    let result = compute_adjusted_mpi(&cells, &weights, &rules, &mpi_cfg)
        .context("failed to compute adjusted MPI")?;
    let report = compare(&result);

    // 5. Summary and report
    print_summary(&report);
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write report: {}", output.display()))?;
    info!(path = %output.display(), "report written");

    Ok(())
}

fn print_summary(report: &ComparisonReport) {
    let s = &report.standard;
    let a = &report.adjusted;
    println!("households: {}", s.total);
    println!("{:<18} {:>10} {:>10} {:>10}", "", "standard", "adjusted", "change");
    let rows = [
        ("MPI", s.mpi, a.mpi),
        ("headcount ratio", s.headcount_ratio, a.headcount_ratio),
        ("intensity", s.intensity, a.intensity),
        ("mean score", s.mean_score, a.mean_score),
    ];
    for (label, before, after) in rows {
        println!("{label:<18} {before:>10.4} {after:>10.4} {:>+10.4}", after - before);
    }
    println!(
        "reclassified: {} to poor, {} to non-poor",
        report.reclassified_to_poor, report.reclassified_to_non_poor
    );

    let mut cells: Vec<_> = report.cells.iter().collect();
    cells.sort_by(|x, y| y.mpi_change.abs().total_cmp(&x.mpi_change.abs()));
    println!();
    println!(
        "{:<10} {:>9} {:>9} {:>10} {:>10}",
        "cell", "harsh", "urban", "std MPI", "adj MPI"
    );
    for c in cells.iter().take(10) {
        println!(
            "{:<10} {:>9.3} {:>9.3} {:>10.4} {:>10.4}",
            c.cell_id, c.climate_harshness, c.urbanization, c.standard_mpi, c.adjusted_mpi
        );
    }
}
