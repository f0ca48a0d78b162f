//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use cmpi_cells::BoundingBox;
use cmpi_climate::HarshnessConfig;
use cmpi_context::Factor;
use cmpi_index::{AdjustmentRule, AdjustmentRules, Indicator, MpiConfig, WeightVector};
use cmpi_io::{SyntheticClimateSource, SyntheticSurveySource};

use crate::config::*;

/// Where a provider reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Synthetic,
}

/// Parses a provider name into a [`SourceKind`].
pub fn parse_source(s: &str) -> Result<SourceKind> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(SourceKind::Csv),
        "synthetic" => Ok(SourceKind::Synthetic),
        other => bail!("unknown data source: {other:?}"),
    }
}

/// Parses a context factor name into a [`Factor`].
pub fn parse_factor(s: &str) -> Result<Factor> {
    match s.to_lowercase().as_str() {
        "climate_harshness" | "harshness" => Ok(Factor::ClimateHarshness),
        "urbanization" => Ok(Factor::Urbanization),
        other => bail!("unknown context factor: {other:?}"),
    }
}

/// Parses a built-in rule set name.
pub fn parse_rule_set(s: &str) -> Result<AdjustmentRules> {
    match s.to_lowercase().as_str() {
        "standard" => Ok(AdjustmentRules::standard()),
        "extended" => Ok(AdjustmentRules::extended()),
        "none" => Ok(AdjustmentRules::empty()),
        other => bail!("unknown rule set: {other:?}"),
    }
}

/// Builds a validated [`HarshnessConfig`].
pub fn build_harshness_config(h: &HarshnessToml) -> Result<HarshnessConfig> {
    let cfg = HarshnessConfig::default()
        .with_heating_base(h.heating_base)
        .with_cooling_base(h.cooling_base)
        .with_degree_day_max(h.degree_day_max)
        .with_extreme_span(h.extreme_span)
        .with_extremes_weight(h.extremes_weight);
    cfg.validate().context("invalid [harshness] settings")?;
    Ok(cfg)
}

/// Builds a validated [`MpiConfig`].
pub fn build_mpi_config(m: &MpiToml) -> Result<MpiConfig> {
    let cfg = MpiConfig::default().with_cutoff(m.cutoff);
    cfg.validate().context("invalid [mpi] cutoff")?;
    Ok(cfg)
}

/// Standard weights: OPHI unless `[mpi].weights` lists all ten indicators.
pub fn build_weights(m: &MpiToml) -> Result<WeightVector> {
    let Some(named) = &m.weights else {
        return Ok(WeightVector::ophi());
    };
    let mut map = BTreeMap::new();
    for (name, &w) in named {
        let indicator: Indicator = name.parse()?;
        map.insert(indicator, w);
    }
    WeightVector::from_map(&map).context("invalid [mpi].weights")
}

/// Custom `[[mpi.rule]]` entries if any, otherwise the named rule set.
pub fn build_rules(m: &MpiToml) -> Result<AdjustmentRules> {
    if m.rules.is_empty() {
        return parse_rule_set(&m.rule_set);
    }
    let rules = m
        .rules
        .iter()
        .map(|r| -> Result<AdjustmentRule> {
            Ok(AdjustmentRule::new(
                r.indicator.parse()?,
                r.base,
                r.slope,
                parse_factor(&r.driver)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    AdjustmentRules::new(rules).context("invalid [[mpi.rule]] entries")
}

/// Builds the synthetic climate generator from `[climate]`.
pub fn build_synthetic_climate(
    c: &ClimateToml,
    seed: Option<u64>,
) -> Result<SyntheticClimateSource> {
    let mut source = SyntheticClimateSource::default()
        .with_resolution(c.resolution)
        .with_year(c.year);
    if let Some(b) = &c.bounds {
        let bounds = BoundingBox::new(b.south, b.north, b.west, b.east)
            .context("invalid [climate.bounds]")?;
        source = source.with_bounds(bounds);
    }
    if let Some(seed) = seed {
        source = source.with_seed(seed);
    }
    source.validate().context("invalid [climate] settings")?;
    Ok(source)
}

/// Builds the synthetic census generator from `[survey]`.
pub fn build_synthetic_survey(
    s: &SurveyToml,
    seed: Option<u64>,
) -> Result<SyntheticSurveySource> {
    let mut source = SyntheticSurveySource::default()
        .with_num_wards(s.num_wards)
        .with_households_per_ward(s.households_per_ward);
    if let Some(seed) = seed {
        source = source.with_seed(seed);
    }
    source.validate().context("invalid [survey] settings")?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_source("CSV").unwrap(), SourceKind::Csv);
        assert_eq!(parse_factor("Urbanization").unwrap(), Factor::Urbanization);
        assert_eq!(parse_rule_set("Extended").unwrap(), AdjustmentRules::extended());
        assert!(parse_source("era5").is_err());
    }

    #[test]
    fn default_mpi_section_gives_standard_setup() {
        let m = MpiToml::default();
        assert_eq!(build_weights(&m).unwrap(), WeightVector::ophi());
        assert_eq!(build_rules(&m).unwrap(), AdjustmentRules::standard());
        assert_eq!(build_mpi_config(&m).unwrap(), MpiConfig::default());
    }

    #[test]
    fn custom_rules_replace_rule_set() {
        let m = MpiToml {
            rules: vec![RuleToml {
                indicator: "cooking_fuel".into(),
                base: 0.05,
                slope: 0.05,
                driver: "climate_harshness".into(),
            }],
            ..MpiToml::default()
        };
        let rules = build_rules(&m).unwrap();
        assert_eq!(rules.rules().len(), 1);
        assert!(rules.get(Indicator::CookingFuel).is_some());
    }

    #[test]
    fn partial_weights_are_rejected() {
        let m = MpiToml {
            weights: Some(BTreeMap::from([("nutrition".to_string(), 1.0)])),
            ..MpiToml::default()
        };
        assert!(build_weights(&m).is_err());
    }

    #[test]
    fn bad_cutoff_is_rejected() {
        let m = MpiToml {
            cutoff: 0.0,
            ..MpiToml::default()
        };
        assert!(build_mpi_config(&m).is_err());
    }
}
