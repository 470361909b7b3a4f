//! DC-005: Recipe cost aggregation.

use super::classifier::IngredientClassifier;
use super::estimator;
use super::types::{IngredientCost, PriceIndex, RecipeCostResult, RecipeRef};

/// Costs ingredient lists against one city's index.
///
/// Borrows the classifier and index so every recipe in a run shares them
/// read-only.
#[derive(Debug, Clone, Copy)]
pub struct RecipeCostAggregator<'a> {
    classifier: &'a IngredientClassifier,
    index: &'a PriceIndex,
}

impl<'a> RecipeCostAggregator<'a> {
    pub fn new(classifier: &'a IngredientClassifier, index: &'a PriceIndex) -> Self {
        Self { classifier, index }
    }

    /// Classify and cost each ingredient in order. Duplicates are counted
    /// individually; an empty list costs nothing.
    pub fn aggregate<S: AsRef<str>>(
        &self,
        recipe: RecipeRef,
        ingredients: &[S],
    ) -> RecipeCostResult {
        let mut total = 0.0;
        let mut items = Vec::with_capacity(ingredients.len());

        for raw in ingredients {
            let name = raw.as_ref();
            let family = self.classifier.identify(name);
            let cost = estimator::estimate(family, self.index);
            total += cost;
            items.push(IngredientCost {
                name: name.to_string(),
                family,
                cost,
            });
        }

        RecipeCostResult {
            recipe,
            items,
            total,
        }
    }
}
