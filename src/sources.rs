//! Picks the climate and survey providers for a run.

use anyhow::{Result, bail};
use tracing::{info, warn};

use cmpi_io::{ClimateSource, CsvClimateSource, CsvSurveySource, SurveySource};

use crate::config::{ClimateToml, SurveyToml};
use crate::convert::{self, SourceKind};

/// Configured climate provider. A missing CSV cache falls back to the
/// synthetic generator when `fallback_to_synthetic` is set.
pub fn climate_source(c: &ClimateToml, seed: Option<u64>) -> Result<Box<dyn ClimateSource>> {
    let kind = convert::parse_source(&c.source)?;
    let source: Box<dyn ClimateSource> = match kind {
        SourceKind::Synthetic => Box::new(convert::build_synthetic_climate(c, seed)?),
        SourceKind::Csv => match &c.cache {
            Some(path) if path.exists() => Box::new(CsvClimateSource::new(path)),
            missing if c.fallback_to_synthetic => {
                warn!(
                    cache = ?missing,
                    "climate cache not available, using synthetic climate"
                );
                Box::new(convert::build_synthetic_climate(c, seed)?)
            }
            Some(path) => Box::new(CsvClimateSource::new(path)),
            None => bail!("[climate] source is csv but no cache path is set"),
        },
    };
    info!(source = source.name(), "selected climate source");
    Ok(source)
}

/// Configured survey provider, with the same fallback rule as
/// [`climate_source`].
pub fn survey_source(s: &SurveyToml, seed: Option<u64>) -> Result<Box<dyn SurveySource>> {
    let kind = convert::parse_source(&s.source)?;
    let source: Box<dyn SurveySource> = match kind {
        SourceKind::Synthetic => Box::new(convert::build_synthetic_survey(s, seed)?),
        SourceKind::Csv => match (&s.wards, &s.households) {
            (Some(w), Some(h)) if w.exists() && h.exists() => {
                Box::new(CsvSurveySource::new(w, h))
            }
            _ if s.fallback_to_synthetic => {
                warn!("survey files not available, using synthetic survey");
                Box::new(convert::build_synthetic_survey(s, seed)?)
            }
            (Some(w), Some(h)) => Box::new(CsvSurveySource::new(w, h)),
            _ => bail!("[survey] source is csv but wards/households paths are not both set"),
        },
    };
    info!(source = source.name(), "selected survey source");
    Ok(source)
}
