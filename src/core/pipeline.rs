//! DC-008: Pipeline — orchestration loop for one comparison run.
//!
//! observations → price index (once) → candidate search → per candidate:
//! ingredients → classify → cost → aggregate → rank

use super::aggregator::RecipeCostAggregator;
use super::classifier::IngredientClassifier;
use super::error::PricingError;
use super::price_index;
use super::ranker;
use super::types::*;
use crate::sources::{EconomicDataSource, RecipeDataSource};
use std::collections::HashSet;
use tracing::{info, warn};

/// Configuration for a comparison run.
pub struct CompareConfig<'a> {
    pub city: &'a str,
    pub dish: &'a str,
    pub max_candidates: usize,
    pub classifier: &'a IngredientClassifier,
}

/// Everything a report needs from one run.
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    pub city: String,
    pub dish: String,
    pub index: PriceIndex,
    pub comparison: RankedComparison,
}

/// Drop repeated recipe names (first occurrence wins) and keep at most `max`.
pub fn select_candidates(found: Vec<RecipeRef>, max: usize) -> Vec<RecipeRef> {
    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .take(max)
        .collect()
}

/// Reconcile the price index for a city from an economic source.
pub fn price_index_for(city: &str, economic: &dyn EconomicDataSource) -> PriceIndex {
    let observations = economic.fetch_observations(city);
    if observations.is_empty() {
        warn!(city, "no price observations; using default prices");
    }
    price_index::build_index(&observations)
}

/// Execute one comparison run.
///
/// Fails with [`PricingError::NoCandidates`] when the search finds nothing;
/// every other acquisition failure degrades to defaults.
pub fn compare(
    cfg: &CompareConfig,
    economic: &dyn EconomicDataSource,
    recipes: &dyn RecipeDataSource,
) -> Result<CompareOutcome, PricingError> {
    let index = price_index_for(cfg.city, economic);
    info!(city = cfg.city, ?index, "price index ready");

    let candidates = select_candidates(recipes.search_candidates(cfg.dish), cfg.max_candidates);
    if candidates.is_empty() {
        return Err(PricingError::NoCandidates {
            dish: cfg.dish.to_string(),
        });
    }

    let aggregator = RecipeCostAggregator::new(cfg.classifier, &index);
    let total = candidates.len();
    let mut results = Vec::with_capacity(total);

    for (i, recipe) in candidates.into_iter().enumerate() {
        info!("[{}/{}] analysing {}", i + 1, total, recipe.name);
        let ingredients = recipes.fetch_ingredients(&recipe.url);
        if ingredients.is_empty() {
            warn!(recipe = %recipe.name, "no ingredients extracted; costed at 0");
        }
        results.push(aggregator.aggregate(recipe, &ingredients));
    }

    let comparison = ranker::rank(results)?;

    Ok(CompareOutcome {
        city: cfg.city.to_string(),
        dish: cfg.dish.to_string(),
        index,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fixture::FixtureSource;
    use approx::assert_relative_eq;

    const FIXTURE: &str = r#"
cities:
  paris:
    - label: Beef Round (1kg)
      price: "20.00 €"
recipes:
  boeuf:
    - name: Boeuf aux tomates
      url: https://example.org/1
      ingredients: ["2 tomates", "200g de boeuf", "sel"]
    - name: Boeuf aux tomates
      url: https://example.org/dup
      ingredients: ["sel"]
    - name: Salade de tomates
      url: https://example.org/2
      ingredients: ["2 tomates", "sel"]
    - name: Recette sans ingredients
      url: https://example.org/3
    - name: Quatrieme recette
      url: https://example.org/4
      ingredients: ["sel"]
"#;

    fn run(city: &str, dish: &str, max: usize) -> Result<CompareOutcome, PricingError> {
        let source = FixtureSource::parse(FIXTURE).unwrap();
        let classifier = IngredientClassifier::default();
        let cfg = CompareConfig {
            city,
            dish,
            max_candidates: max,
            classifier: &classifier,
        };
        compare(&cfg, &source, &source)
    }

    #[test]
    fn test_dc008_select_candidates_dedupes_and_limits() {
        let found = vec![
            RecipeRef::new("A", "u1"),
            RecipeRef::new("A", "u2"),
            RecipeRef::new("B", "u3"),
            RecipeRef::new("C", "u4"),
        ];
        let picked = select_candidates(found, 2);
        assert_eq!(picked, vec![RecipeRef::new("A", "u1"), RecipeRef::new("B", "u3")]);
    }

    #[test]
    fn test_dc008_compare_full_run() {
        let outcome = run("Paris", "boeuf", 3).unwrap();
        assert_eq!(outcome.index.red_meat, 20.0);

        let c = &outcome.comparison;
        let names: Vec<_> = c.candidates.iter().map(|r| r.recipe.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Boeuf aux tomates", "Salade de tomates", "Recette sans ingredients"]
        );
        // 0.375 + 3.0 + 0.1
        assert_relative_eq!(c.candidates[0].total, 3.475);
        assert_relative_eq!(c.candidates[1].total, 0.475);
        assert_eq!(c.candidates[2].total, 0.0);
        assert_eq!(c.winner, 2);
    }

    #[test]
    fn test_dc008_unknown_city_uses_defaults() {
        let outcome = run("Tokyo", "boeuf", 1).unwrap();
        assert_eq!(outcome.index, PriceIndex::default());
        assert_relative_eq!(outcome.comparison.candidates[0].total, 2.725);
        assert_eq!(outcome.comparison.winner().display_total(), "2.73");
    }

    #[test]
    fn test_dc008_no_candidates() {
        let err = run("Paris", "quiche", 3).unwrap_err();
        assert_eq!(
            err,
            PricingError::NoCandidates {
                dish: "quiche".to_string()
            }
        );
        assert_eq!(err.to_string(), "no candidates found for 'quiche'");
    }

    #[test]
    fn test_dc008_price_index_for_missing_city() {
        let source = FixtureSource::parse(FIXTURE).unwrap();
        assert_eq!(price_index_for("Berlin", &source), PriceIndex::default());
    }
}
