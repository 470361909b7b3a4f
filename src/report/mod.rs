//! DC-012: Comparison reports — view model, sinks, atomic file writes.

pub mod html;
pub mod json;

use crate::core::pipeline::CompareOutcome;
use crate::core::types::{PriceFamily, PriceIndex, ReportFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One ingredient line shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportItem {
    pub name: String,
    pub family: PriceFamily,
    pub cost: String,
}

/// One recipe card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub name: String,
    pub url: String,
    /// Total rounded to cents
    pub total: String,
    pub winner: bool,
    /// First `breakdown_limit` ingredients
    pub items: Vec<ReportItem>,
    /// More ingredients exist than are shown
    pub truncated: bool,
}

/// Everything a sink renders: query context plus one card per candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub city: String,
    pub dish: String,
    pub currency: &'static str,
    /// Reconciled unit prices the totals were computed from
    pub index: PriceIndex,
    pub cards: Vec<ReportCard>,
}

impl ComparisonReport {
    /// Build the view model from a run, keeping evaluation order.
    pub fn from_outcome(outcome: &CompareOutcome, breakdown_limit: usize) -> Self {
        let comparison = &outcome.comparison;
        let cards = comparison
            .candidates
            .iter()
            .enumerate()
            .map(|(i, result)| ReportCard {
                name: result.recipe.name.clone(),
                url: result.recipe.url.clone(),
                total: result.display_total(),
                winner: comparison.is_winner(i),
                items: result
                    .items
                    .iter()
                    .take(breakdown_limit)
                    .map(|item| ReportItem {
                        name: item.name.clone(),
                        family: item.family,
                        cost: format!("{:.2}", item.cost),
                    })
                    .collect(),
                truncated: result.items.len() > breakdown_limit,
            })
            .collect();

        Self {
            city: outcome.city.clone(),
            dish: outcome.dish.clone(),
            currency: "€",
            index: outcome.index,
            cards,
        }
    }

    pub fn winner(&self) -> Option<&ReportCard> {
        self.cards.iter().find(|c| c.winner)
    }
}

/// Produces a durable artifact from a report. Returns the written path.
pub trait ReportSink {
    fn write(&self, report: &ComparisonReport) -> Result<PathBuf, String>;
}

/// Report file name for a dish, e.g. "gratin dauphinois" → `comparatif_gratin_dauphinois.html`.
pub fn report_file_name(dish: &str, format: ReportFormat) -> String {
    format!("comparatif_{}.{}", dish.trim().replace(' ', "_"), format.extension())
}

/// Sink for a configured format writing into `output_dir`.
pub fn sink_for(format: ReportFormat, output_dir: &Path) -> Box<dyn ReportSink> {
    match format {
        ReportFormat::Html => Box::new(html::HtmlReportSink::new(output_dir)),
        ReportFormat::Json => Box::new(json::JsonReportSink::new(output_dir)),
    }
}

/// Write a file atomically (write to temp, then rename).
pub fn write_atomic(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        format!(
            "cannot rename {} → {}: {}",
            tmp_path.display(),
            path.display(),
            e
        )
    })?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::types::{IngredientCost, RankedComparison, RecipeCostResult, RecipeRef};

    pub(crate) fn sample_outcome() -> CompareOutcome {
        let many: Vec<IngredientCost> = (0..8)
            .map(|i| IngredientCost {
                name: format!("ingredient {}", i),
                family: PriceFamily::Other,
                cost: 0.5,
            })
            .collect();
        let cheap = RecipeCostResult {
            recipe: RecipeRef::new("Salade <simple>", "https://example.org/a?x=1&y=2"),
            items: vec![IngredientCost {
                name: "2 tomates".to_string(),
                family: PriceFamily::Vegetable,
                cost: 0.375,
            }],
            total: 0.375,
        };
        let pricey = RecipeCostResult {
            recipe: RecipeRef::new("Grand plat", "https://example.org/b"),
            items: many,
            total: 4.0,
        };
        CompareOutcome {
            city: "Paris".to_string(),
            dish: "salade niçoise".to_string(),
            index: PriceIndex {
                red_meat: 18.5,
                ..PriceIndex::default()
            },
            comparison: RankedComparison {
                candidates: vec![pricey, cheap],
                winner: 1,
            },
        }
    }

    #[test]
    fn test_dc012_view_model() {
        let report = ComparisonReport::from_outcome(&sample_outcome(), 6);
        assert_eq!(report.cards.len(), 2);
        assert_eq!(report.cards[0].name, "Grand plat");
        assert_eq!(report.cards[0].total, "4.00");
        assert_eq!(report.cards[0].items.len(), 6);
        assert!(report.cards[0].truncated);
        assert!(!report.cards[0].winner);

        assert_eq!(report.cards[1].total, "0.38");
        assert_eq!(report.cards[1].items[0].cost, "0.38");
        assert!(!report.cards[1].truncated);
        assert_eq!(report.winner().unwrap().name, "Salade <simple>");
        assert_eq!(report.index.red_meat, 18.5);
    }

    #[test]
    fn test_dc012_exact_limit_not_truncated() {
        let report = ComparisonReport::from_outcome(&sample_outcome(), 8);
        assert_eq!(report.cards[0].items.len(), 8);
        assert!(!report.cards[0].truncated);
    }

    #[test]
    fn test_dc012_report_file_name() {
        assert_eq!(
            report_file_name("gratin dauphinois", ReportFormat::Html),
            "comparatif_gratin_dauphinois.html"
        );
        assert_eq!(report_file_name("quiche", ReportFormat::Json), "comparatif_quiche.json");
    }

    #[test]
    fn test_dc012_write_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.html");
        write_atomic(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(!dir.path().join("nested").join("out.html.tmp").exists());
    }

    #[test]
    fn test_dc012_sink_for_format() {
        let dir = tempfile::tempdir().unwrap();
        let report = ComparisonReport::from_outcome(&sample_outcome(), 6);
        let html = sink_for(ReportFormat::Html, dir.path()).write(&report).unwrap();
        let json = sink_for(ReportFormat::Json, dir.path()).write(&report).unwrap();
        assert_eq!(html.extension().unwrap(), "html");
        assert_eq!(json.extension().unwrap(), "json");
    }
}
