//! Synthetic stockpile quality time series.
//!
//! DESIGN
//! ======
//! There is no telemetry source behind the dashboard, so stockpile feed
//! quality is sampled from fixed uniform ranges. Every call seeds its own
//! `StdRng` before the first draw, which makes the output a pure function of
//! (seed, roster, attribute table, dates). Charts stay stable across
//! re-renders and concurrent requests cannot disturb each other's stream.
//!
//! Sampling order is entity, then date, then attribute, all in declared
//! order. Attributes are independent draws.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// Seed used by the dashboard when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Stockpile roster in display order.
pub const STOCKPILES: [&str; 6] = ["S1", "S2", "S3", "S4", "S5", "S6"];

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// A sampled attribute and its inclusive value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl AttributeSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self { name: name.into(), min, max }
    }

    /// Whether `value` falls inside `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Built-in ore quality attributes.
#[must_use]
pub fn default_attributes() -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::new("Hardness", 40.0, 60.0),
        AttributeSpec::new("Fe%", 30.0, 70.0),
        AttributeSpec::new("Silica%", 5.0, 25.0),
        AttributeSpec::new("F80", 0.0, 100.0),
        AttributeSpec::new("F50", 0.0, 100.0),
        AttributeSpec::new("Clay%", 5.0, 30.0),
        AttributeSpec::new("Phos%", 0.1, 1.5),
    ]
}

/// Inputs to [`generate`] other than the dates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub entities: Vec<String>,
    pub attributes: Vec<AttributeSpec>,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entities: STOCKPILES.iter().map(ToString::to_string).collect(),
            attributes: default_attributes(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = entities.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<AttributeSpec>) -> Self {
        self.attributes = attributes;
        self
    }

    fn validate(&self) -> Result<(), SeriesError> {
        if self.entities.is_empty() {
            return Err(SeriesError::InvalidInput("entity roster is empty".into()));
        }
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.as_str()) {
                return Err(SeriesError::InvalidInput(format!("duplicate entity '{entity}'")));
            }
        }

        if self.attributes.is_empty() {
            return Err(SeriesError::InvalidInput("attribute table is empty".into()));
        }
        let mut seen = HashSet::new();
        for attr in &self.attributes {
            if !seen.insert(attr.name.as_str()) {
                return Err(SeriesError::InvalidInput(format!("duplicate attribute '{}'", attr.name)));
            }
            if !attr.min.is_finite() || !attr.max.is_finite() {
                return Err(SeriesError::InvalidInput(format!("attribute '{}' has a non-finite bound", attr.name)));
            }
            if attr.min > attr.max {
                return Err(SeriesError::InvalidInput(format!(
                    "attribute '{}' range is inverted ({} > {})",
                    attr.name, attr.min, attr.max
                )));
            }
            // Uniform sampling needs a finite width, not just finite bounds.
            if !(attr.max - attr.min).is_finite() {
                return Err(SeriesError::InvalidInput(format!("attribute '{}' range is too wide", attr.name)));
            }
        }
        Ok(())
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// One sampled row: every configured attribute at one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRecord {
    pub date: Date,
    pub values: BTreeMap<String, f64>,
}

/// All records for one entity, in input date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySeries {
    pub entity: String,
    pub records: Vec<SeriesRecord>,
}

/// Parallel date/value arrays for one entity and attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub dates: Vec<Date>,
    pub values: Vec<f64>,
}

/// Generator output, one entry per entity in roster order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    pub series: Vec<EntitySeries>,
}

impl SeriesSet {
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&EntitySeries> {
        self.series.iter().find(|s| s.entity == entity)
    }

    /// Project one attribute of one entity into chart-ready arrays.
    /// `None` if either name is unknown.
    #[must_use]
    pub fn trace(&self, entity: &str, attribute: &str) -> Option<Trace> {
        let series = self.get(entity)?;
        let mut dates = Vec::with_capacity(series.records.len());
        let mut values = Vec::with_capacity(series.records.len());
        for record in &series.records {
            dates.push(record.date);
            values.push(*record.values.get(attribute)?);
        }
        Some(Trace { dates, values })
    }

    #[must_use]
    pub fn entities(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.entity.as_str()).collect()
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Sample one record per entity per date.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidInput`] when `dates` is empty or the
/// configuration is unusable (empty roster, inverted or non-finite range,
/// a range whose width overflows, duplicate names). Nothing is sampled in that case.
pub fn generate(config: &GeneratorConfig, dates: &[Date]) -> Result<SeriesSet, SeriesError> {
    if dates.is_empty() {
        return Err(SeriesError::InvalidInput("time-point sequence is empty".into()));
    }
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let series = config
        .entities
        .iter()
        .map(|entity| {
            let records = dates
                .iter()
                .map(|&date| {
                    let values = config
                        .attributes
                        .iter()
                        .map(|attr| (attr.name.clone(), rng.random_range(attr.min..=attr.max)))
                        .collect();
                    SeriesRecord { date, values }
                })
                .collect();
            EntitySeries { entity: entity.clone(), records }
        })
        .collect();

    Ok(SeriesSet { series })
}

/// Dates from `start` to `end` inclusive, every `step`.
///
/// A non-positive step or `start > end` yields no dates.
#[must_use]
pub fn date_range(start: Date, end: Date, step: Duration) -> Vec<Date> {
    let mut dates = Vec::new();
    if !step.is_positive() {
        return dates;
    }
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        dates.push(date);
        current = date.checked_add(step);
    }
    dates
}

#[cfg(test)]
#[path = "series_test.rs"]
mod tests;
