//! DC-001: Domain types — price families, price index, costed recipes, config.
//!
//! Defines the YAML schema for `dishcost.yaml` and the value types that flow
//! through the costing pipeline. Config types derive Serialize/Deserialize for
//! YAML roundtripping; result types derive Serialize for the JSON report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Price families
// ============================================================================

/// Coarse ingredient category used to select a pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceFamily {
    MeatRed,
    Poultry,
    Fish,
    Vegetable,
    Fruit,
    Starch,
    Dairy,
    SweetGrocery,
    Condiment,
    Aromatic,
    Other,
}

impl PriceFamily {
    /// Classification priority. First match wins; `Other` is never matched
    /// and is the fallback.
    pub const PRIORITY: [PriceFamily; 10] = [
        PriceFamily::MeatRed,
        PriceFamily::Poultry,
        PriceFamily::Fish,
        PriceFamily::Vegetable,
        PriceFamily::Fruit,
        PriceFamily::Starch,
        PriceFamily::Dairy,
        PriceFamily::SweetGrocery,
        PriceFamily::Condiment,
        PriceFamily::Aromatic,
    ];
}

impl fmt::Display for PriceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeatRed => write!(f, "MEAT_RED"),
            Self::Poultry => write!(f, "POULTRY"),
            Self::Fish => write!(f, "FISH"),
            Self::Vegetable => write!(f, "VEGETABLE"),
            Self::Fruit => write!(f, "FRUIT"),
            Self::Starch => write!(f, "STARCH"),
            Self::Dairy => write!(f, "DAIRY"),
            Self::SweetGrocery => write!(f, "SWEET_GROCERY"),
            Self::Condiment => write!(f, "CONDIMENT"),
            Self::Aromatic => write!(f, "AROMATIC"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

// ============================================================================
// Price index
// ============================================================================

/// Per-family reference unit prices for one city, in EUR per kilogram-equivalent.
///
/// Always fully populated: built from [`PriceIndex::default`] and only ever
/// overwritten field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceIndex {
    /// Beef and other red meat (also the base for fish)
    pub red_meat: f64,

    /// Chicken and other poultry
    pub poultry: f64,

    /// Common vegetables (running average of observed samples)
    pub vegetable: f64,

    /// Rice, pasta, bread and flour
    pub starch: f64,

    /// Cheese and other dairy
    pub dairy: f64,

    /// Fruit (kept for completeness, never observed)
    pub fruit: f64,
}

pub const DEFAULT_RED_MEAT: f64 = 15.0;
pub const DEFAULT_POULTRY: f64 = 10.0;
pub const DEFAULT_VEGETABLE: f64 = 2.50;
pub const DEFAULT_STARCH: f64 = 2.00;
pub const DEFAULT_DAIRY: f64 = 10.0;
pub const DEFAULT_FRUIT: f64 = 2.50;

impl Default for PriceIndex {
    fn default() -> Self {
        Self {
            red_meat: DEFAULT_RED_MEAT,
            poultry: DEFAULT_POULTRY,
            vegetable: DEFAULT_VEGETABLE,
            starch: DEFAULT_STARCH,
            dairy: DEFAULT_DAIRY,
            fruit: DEFAULT_FRUIT,
        }
    }
}

/// A raw price sample from an economic data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Row label, e.g. "Chicken Fillets (1kg)"
    #[serde(default)]
    pub label: String,

    /// Unparsed price text, e.g. "10.50 €". Missing values parse as empty and are skipped.
    #[serde(rename = "price", default)]
    pub raw_price: String,
}

impl Observation {
    pub fn new(label: impl Into<String>, raw_price: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            raw_price: raw_price.into(),
        }
    }
}

// ============================================================================
// Recipes and results
// ============================================================================

/// A recipe candidate returned by a recipe search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub name: String,
    pub url: String,
}

impl RecipeRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One costed ingredient occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientCost {
    /// Raw ingredient text as extracted from the recipe
    pub name: String,
    pub family: PriceFamily,
    pub cost: f64,
}

/// Cost estimate for a single recipe candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCostResult {
    pub recipe: RecipeRef,

    /// Itemized breakdown in input order
    pub items: Vec<IngredientCost>,

    /// Sum of item costs
    pub total: f64,
}

impl RecipeCostResult {
    /// Total rounded to cents for display.
    pub fn display_total(&self) -> String {
        format!("{:.2}", self.total)
    }
}

/// Candidates in evaluation order with the cheapest one flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComparison {
    pub candidates: Vec<RecipeCostResult>,
    pub winner: usize,
}

impl RankedComparison {
    pub fn winner(&self) -> &RecipeCostResult {
        &self.candidates[self.winner]
    }

    pub fn is_winner(&self, index: usize) -> bool {
        index == self.winner
    }

    /// Candidates sorted by ascending total. Equal totals keep evaluation order.
    pub fn ordered(&self) -> Vec<&RecipeCostResult> {
        let mut sorted: Vec<&RecipeCostResult> = self.candidates.iter().collect();
        sorted.sort_by(|a, b| a.total.total_cmp(&b.total));
        sorted
    }
}

// ============================================================================
// dishcost.yaml
// ============================================================================

/// Root configuration — what to compare, where the data comes from, how to report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishcostConfig {
    /// Schema version (must be "1.0")
    pub version: String,

    /// City whose cost-of-living index prices the ingredients
    pub city: String,

    /// Dish to search recipes for
    pub dish: String,

    /// Maximum number of recipe candidates to compare
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub report: ReportPolicy,

    /// Keyword list overrides per price family
    #[serde(default)]
    pub taxonomy: IndexMap<PriceFamily, Vec<String>>,
}

fn default_max_candidates() -> usize {
    3
}

/// Where observations and recipes come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Fixture file (required for `kind: fixture`)
    #[serde(default)]
    pub fixture: Option<String>,

    /// HTTP timeout for live sources
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            fixture: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Data acquisition backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Fixture,
    Live,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixture => write!(f, "fixture"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Report output policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPolicy {
    #[serde(default)]
    pub format: ReportFormat,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Ingredients shown per candidate before truncation
    #[serde(default = "default_breakdown_limit")]
    pub breakdown_limit: usize,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            output_dir: default_output_dir(),
            breakdown_limit: default_breakdown_limit(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_breakdown_limit() -> usize {
    6
}

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, total: f64) -> RecipeCostResult {
        RecipeCostResult {
            recipe: RecipeRef::new(name, format!("https://example.org/{}", name)),
            items: vec![],
            total,
        }
    }

    #[test]
    fn test_dc001_config_parse() {
        let yaml = r#"
version: "1.0"
city: Paris
dish: lasagnes
max_candidates: 5
sources:
  kind: live
  timeout_secs: 4
report:
  format: json
  output_dir: /tmp/out
  breakdown_limit: 3
taxonomy:
  FISH: [bar, dorade]
"#;
        let config: DishcostConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.city, "Paris");
        assert_eq!(config.max_candidates, 5);
        assert_eq!(config.sources.kind, SourceKind::Live);
        assert_eq!(config.sources.timeout_secs, 4);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.breakdown_limit, 3);
        assert_eq!(config.taxonomy[&PriceFamily::Fish], vec!["bar", "dorade"]);
    }

    #[test]
    fn test_dc001_config_defaults() {
        let yaml = r#"
version: "1.0"
city: Lyon
dish: quiche
"#;
        let config: DishcostConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.max_candidates, 3);
        assert_eq!(config.sources.kind, SourceKind::Fixture);
        assert!(config.sources.fixture.is_none());
        assert_eq!(config.sources.timeout_secs, 10);
        assert_eq!(config.report.format, ReportFormat::Html);
        assert_eq!(config.report.output_dir, ".");
        assert_eq!(config.report.breakdown_limit, 6);
        assert!(config.taxonomy.is_empty());
    }

    #[test]
    fn test_dc001_price_index_defaults() {
        let index = PriceIndex::default();
        assert_eq!(index.red_meat, 15.0);
        assert_eq!(index.poultry, 10.0);
        assert_eq!(index.vegetable, 2.5);
        assert_eq!(index.starch, 2.0);
        assert_eq!(index.dairy, 10.0);
        assert_eq!(index.fruit, 2.5);
    }

    #[test]
    fn test_dc001_family_display_matches_serde() {
        for family in PriceFamily::PRIORITY {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{}\"", family));
        }
        assert_eq!(PriceFamily::Other.to_string(), "OTHER");
    }

    #[test]
    fn test_dc001_priority_excludes_other() {
        assert!(!PriceFamily::PRIORITY.contains(&PriceFamily::Other));
        assert_eq!(PriceFamily::PRIORITY[0], PriceFamily::MeatRed);
        assert_eq!(PriceFamily::PRIORITY[9], PriceFamily::Aromatic);
    }

    #[test]
    fn test_dc001_observation_yaml_field_name() {
        let obs: Observation =
            serde_yaml_ng::from_str("label: Rice (1kg)\nprice: \"1.80 €\"").unwrap();
        assert_eq!(obs, Observation::new("Rice (1kg)", "1.80 €"));
    }

    #[test]
    fn test_dc001_display_total_rounds() {
        assert_eq!(result("a", 2.725).display_total(), "2.73");
        assert_eq!(result("a", 0.0).display_total(), "0.00");
    }

    #[test]
    fn test_dc001_ordered_is_stable() {
        let ranked = RankedComparison {
            candidates: vec![result("a", 4.2), result("b", 3.1), result("c", 3.1)],
            winner: 1,
        };
        let names: Vec<_> = ranked.ordered().iter().map(|r| r.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(ranked.winner().recipe.name, "b");
        assert!(ranked.is_winner(1));
        assert!(!ranked.is_winner(2));
    }

    #[test]
    fn test_dc001_report_format_extension() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Json.extension(), "json");
    }
}
