//! Weights command: show how one context shifts the indicator weights.

use anyhow::{Context, Result};

use cmpi_context::ContextFactors;
use cmpi_index::{AdjustmentRules, Indicator, WeightVector, adjusted_weights};

use crate::cli::WeightsArgs;

pub fn run(args: WeightsArgs) -> Result<()> {
    let factors = ContextFactors::new(args.harshness, args.urbanization);
    let rules = if args.extended {
        AdjustmentRules::extended()
    } else {
        AdjustmentRules::standard()
    };
    let standard = WeightVector::ophi();
    let adjusted = adjusted_weights(&standard, &factors, &rules)
        .context("failed to compute adjusted weights")?;

    println!(
        "harshness {:.3}, urbanization {:.3} (raw sum {:.4})",
        factors.climate_harshness(),
        factors.urbanization(),
        adjusted.raw_sum
    );
    println!(
        "{:<20} {:<17} {:>9} {:>9} {:>9}",
        "indicator", "dimension", "standard", "adjusted", "change"
    );
    for ind in Indicator::ALL {
        let before = standard.get(ind);
        let after = adjusted.weights.get(ind);
        println!(
            "{:<20} {:<17} {:>9.4} {:>9.4} {:>+9.4}",
            ind.name(),
            ind.dimension().name(),
            before,
            after,
            after - before
        );
    }
    Ok(())
}
