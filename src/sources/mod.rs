//! DC-010/011: Data sources — fixture file and live web pages.
//!
//! Sources hand the pipeline fully materialized vectors. Failures never cross
//! the trait boundary: a source that cannot deliver returns an empty vector and
//! the pipeline degrades to defaults.

pub mod fixture;
pub mod http;

use crate::core::types::{DishcostConfig, Observation, RecipeRef, SourceKind};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Cost-of-living observations for a city.
pub trait EconomicDataSource {
    fn fetch_observations(&self, city: &str) -> Vec<Observation>;
}

/// Recipe search and ingredient extraction.
pub trait RecipeDataSource {
    fn search_candidates(&self, dish: &str) -> Vec<RecipeRef>;
    fn fetch_ingredients(&self, url: &str) -> Vec<String>;
}

/// Acquisition failure inside a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },
}

/// A named acquisition attempt.
pub type Strategy<'a, T> = (&'a str, Box<dyn Fn() -> Result<Vec<T>, SourceError> + 'a>);

/// Box an acquisition attempt under a name.
pub fn strategy<'a, T>(
    name: &'a str,
    attempt: impl Fn() -> Result<Vec<T>, SourceError> + 'a,
) -> Strategy<'a, T> {
    (name, Box::new(attempt))
}

/// Try strategies in order and return the first non-empty success.
/// Returns an empty vector when every strategy fails or comes back empty.
pub fn first_success<T>(what: &str, strategies: Vec<Strategy<'_, T>>) -> Vec<T> {
    for (name, attempt) in strategies {
        match attempt() {
            Ok(items) if !items.is_empty() => {
                debug!(what, strategy = name, count = items.len(), "acquired");
                return items;
            }
            Ok(_) => debug!(what, strategy = name, "strategy returned nothing"),
            Err(e) => warn!(what, strategy = name, error = %e, "strategy failed"),
        }
    }
    Vec::new()
}

/// Build the economic and recipe sources selected by a config.
///
/// `base_dir` resolves a relative fixture path (normally the config file's
/// directory).
pub fn from_config(
    config: &DishcostConfig,
    base_dir: &Path,
) -> Result<(Box<dyn EconomicDataSource>, Box<dyn RecipeDataSource>), String> {
    match config.sources.kind {
        SourceKind::Fixture => {
            let rel = config
                .sources
                .fixture
                .as_deref()
                .ok_or("sources.fixture is required when sources.kind is fixture")?;
            let source = fixture::FixtureSource::load(&base_dir.join(rel))?;
            let economic: Box<dyn EconomicDataSource> = Box::new(source.clone());
            let recipes: Box<dyn RecipeDataSource> = Box::new(source);
            Ok((economic, recipes))
        }
        SourceKind::Live => {
            let timeout = Duration::from_secs(config.sources.timeout_secs);
            let economic: Box<dyn EconomicDataSource> = Box::new(http::NumbeoSource::new(timeout)?);
            let recipes: Box<dyn RecipeDataSource> = Box::new(http::MarmitonSource::new(timeout)?);
            Ok((economic, recipes))
        }
    }
}
