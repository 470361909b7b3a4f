//! DC-010: Fixture source — observations and recipes from a local YAML file.
//!
//! ```yaml
//! cities:
//!   paris:
//!     - label: Chicken Fillets (1kg)
//!       price: "10.50 €"
//! recipes:
//!   lasagnes:
//!     - name: Lasagnes à la bolognaise
//!       url: https://www.marmiton.org/recettes/recette_lasagnes_11405.aspx
//!       ingredients: [300 g de boeuf haché, 1 oignon, 12 feuilles de lasagne]
//! ```

use super::{EconomicDataSource, RecipeDataSource, SourceError};
use crate::core::types::{Observation, RecipeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One recipe entry in a fixture file.
///
/// Entries without a name or url are ignored rather than failing the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Parsed fixture document. City and dish keys match case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    pub cities: IndexMap<String, Vec<Observation>>,
    #[serde(default)]
    pub recipes: IndexMap<String, Vec<FixtureRecipe>>,
}

impl FixtureSource {
    /// Load a fixture file from disk.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SourceError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .to_string()
        })?;
        Self::parse(&content)
    }

    /// Parse a fixture document from a string.
    pub fn parse(yaml: &str) -> Result<Self, String> {
        serde_yaml_ng::from_str(yaml).map_err(|e| format!("fixture parse error: {}", e))
    }

    fn lookup<'a, V>(map: &'a IndexMap<String, V>, key: &str) -> Option<&'a V> {
        let wanted = key.trim().to_lowercase();
        map.iter()
            .find(|(k, _)| k.trim().to_lowercase() == wanted)
            .map(|(_, v)| v)
    }
}

impl EconomicDataSource for FixtureSource {
    fn fetch_observations(&self, city: &str) -> Vec<Observation> {
        match Self::lookup(&self.cities, city) {
            Some(observations) => observations.clone(),
            None => {
                warn!(city, "city not in fixture; using default prices");
                Vec::new()
            }
        }
    }
}

impl RecipeDataSource for FixtureSource {
    fn search_candidates(&self, dish: &str) -> Vec<RecipeRef> {
        Self::lookup(&self.recipes, dish)
            .map(|recipes| {
                recipes
                    .iter()
                    .filter(|r| {
                        let usable = !r.name.trim().is_empty() && !r.url.trim().is_empty();
                        if !usable {
                            warn!(dish, name = %r.name, "fixture recipe without name or url");
                        }
                        usable
                    })
                    .map(|r| RecipeRef::new(&r.name, &r.url))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn fetch_ingredients(&self, url: &str) -> Vec<String> {
        self.recipes
            .values()
            .flatten()
            .find(|r| !r.url.trim().is_empty() && r.url == url)
            .map(|r| r.ingredients.clone())
            .unwrap_or_default()
    }
}
