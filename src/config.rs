use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration file (`cmpi.toml`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CmpiConfig {
    /// Seed shared by the synthetic generators.
    #[serde(default)]
    pub seed: Option<u64>,

    /// JSON report path for `cmpi run`.
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub climate: ClimateToml,

    #[serde(default)]
    pub survey: SurveyToml,

    #[serde(default)]
    pub harshness: HarshnessToml,

    #[serde(default)]
    pub mpi: MpiToml,
}

/// Reads and parses a configuration file.
pub fn load(path: &Path) -> Result<CmpiConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateToml {
    /// `csv` or `synthetic`.
    #[serde(default = "default_climate_source")]
    pub source: String,
    /// Cached climate CSV read when `source = "csv"`.
    #[serde(default)]
    pub cache: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub fallback_to_synthetic: bool,
    #[serde(default = "default_year")]
    pub year: i32,
    /// Synthetic grid spacing in degrees.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Synthetic grid extent; the Durban box when unset.
    #[serde(default)]
    pub bounds: Option<BoundsToml>,
}

impl Default for ClimateToml {
    fn default() -> Self {
        Self {
            source: default_climate_source(),
            cache: None,
            fallback_to_synthetic: true,
            year: default_year(),
            resolution: default_resolution(),
            bounds: None,
        }
    }
}

fn default_climate_source() -> String {
    "csv".to_string()
}
fn default_true() -> bool {
    true
}
fn default_year() -> i32 {
    2023
}
fn default_resolution() -> f64 {
    0.25
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundsToml {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyToml {
    /// `csv` or `synthetic`.
    #[serde(default = "default_survey_source")]
    pub source: String,
    #[serde(default)]
    pub wards: Option<PathBuf>,
    #[serde(default)]
    pub households: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub fallback_to_synthetic: bool,
    #[serde(default = "default_num_wards")]
    pub num_wards: usize,
    #[serde(default = "default_households_per_ward")]
    pub households_per_ward: usize,
}

impl Default for SurveyToml {
    fn default() -> Self {
        Self {
            source: default_survey_source(),
            wards: None,
            households: None,
            fallback_to_synthetic: true,
            num_wards: default_num_wards(),
            households_per_ward: default_households_per_ward(),
        }
    }
}

fn default_survey_source() -> String {
    "synthetic".to_string()
}
fn default_num_wards() -> usize {
    50
}
fn default_households_per_ward() -> usize {
    30
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarshnessToml {
    #[serde(default = "default_heating_base")]
    pub heating_base: f64,
    #[serde(default = "default_cooling_base")]
    pub cooling_base: f64,
    #[serde(default = "default_degree_day_max")]
    pub degree_day_max: f64,
    #[serde(default = "default_extreme_span")]
    pub extreme_span: f64,
    /// 0 uses degree days only.
    #[serde(default = "default_extremes_weight")]
    pub extremes_weight: f64,
}

impl Default for HarshnessToml {
    fn default() -> Self {
        Self {
            heating_base: default_heating_base(),
            cooling_base: default_cooling_base(),
            degree_day_max: default_degree_day_max(),
            extreme_span: default_extreme_span(),
            extremes_weight: default_extremes_weight(),
        }
    }
}

fn default_heating_base() -> f64 {
    18.0
}
fn default_cooling_base() -> f64 {
    24.0
}
fn default_degree_day_max() -> f64 {
    3000.0
}
fn default_extreme_span() -> f64 {
    50.0
}
fn default_extremes_weight() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MpiToml {
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    /// Indicator name -> standard weight. OPHI weights when unset.
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
    /// `standard`, `extended` or `none`; ignored when `rule` entries exist.
    #[serde(default = "default_rule_set")]
    pub rule_set: String,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleToml>,
}

impl Default for MpiToml {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            weights: None,
            rule_set: default_rule_set(),
            rules: Vec::new(),
        }
    }
}

fn default_cutoff() -> f64 {
    1.0 / 3.0
}
fn default_rule_set() -> String {
    "standard".to_string()
}

/// One `[[mpi.rule]]` entry: `weight = base + slope * driver`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleToml {
    pub indicator: String,
    pub base: f64,
    pub slope: f64,
    /// `climate_harshness` or `urbanization`.
    pub driver: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: CmpiConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.climate.source, "csv");
        assert!(cfg.climate.fallback_to_synthetic);
        assert_eq!(cfg.survey.households_per_ward, 30);
        assert_eq!(cfg.mpi.rule_set, "standard");
        assert!(cfg.mpi.rules.is_empty());
    }

    #[test]
    fn parses_custom_rules_and_weights() {
        let cfg: CmpiConfig = toml::from_str(
            r#"
            seed = 7

            [mpi]
            cutoff = 0.4
            weights = { nutrition = 0.5, assets = 0.5 }

            [[mpi.rule]]
            indicator = "electricity"
            base = 0.1
            slope = 0.1
            driver = "climate_harshness"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.mpi.rules.len(), 1);
        assert_eq!(cfg.mpi.weights.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = toml::from_str::<CmpiConfig>("[climate]\nsorce = \"csv\"\n");
        assert!(err.is_err());
    }
}
