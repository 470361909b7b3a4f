//! DC-007: YAML parsing and validation.
//!
//! Parses dishcost.yaml and validates structural constraints:
//! - Version must be "1.0"
//! - City and dish must not be empty
//! - max_candidates and breakdown_limit must be at least 1
//! - Fixture sources need a fixture path
//! - Taxonomy overrides must not target OTHER or contain blank keywords

use super::classifier::KeywordTable;
use super::types::*;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a dishcost.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<DishcostConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a dishcost.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<DishcostConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &DishcostConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.city.trim().is_empty() {
        errors.push(ValidationError {
            message: "city must not be empty".to_string(),
        });
    }

    if config.dish.trim().is_empty() {
        errors.push(ValidationError {
            message: "dish must not be empty".to_string(),
        });
    }

    if config.max_candidates == 0 {
        errors.push(ValidationError {
            message: "max_candidates must be at least 1".to_string(),
        });
    }

    if config.report.breakdown_limit == 0 {
        errors.push(ValidationError {
            message: "report.breakdown_limit must be at least 1".to_string(),
        });
    }

    match config.sources.kind {
        SourceKind::Fixture => {
            if config.sources.fixture.as_deref().is_none_or(|f| f.trim().is_empty()) {
                errors.push(ValidationError {
                    message: "sources.fixture is required when sources.kind is fixture"
                        .to_string(),
                });
            }
        }
        SourceKind::Live => {
            if config.sources.timeout_secs == 0 {
                errors.push(ValidationError {
                    message: "sources.timeout_secs must be at least 1".to_string(),
                });
            }
        }
    }

    if let Err(e) = KeywordTable::default().apply_overrides(&config.taxonomy) {
        errors.push(ValidationError {
            message: format!("taxonomy: {}", e),
        });
    }

    errors
}

/// Build the keyword table for a config: stock table plus overrides.
pub fn keyword_table(config: &DishcostConfig) -> Result<KeywordTable, String> {
    let mut table = KeywordTable::default();
    table.apply_overrides(&config.taxonomy)?;
    Ok(table)
}
