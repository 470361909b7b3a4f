//! DC-002: Ingredient classification by keyword containment.
//!
//! Maps a raw ingredient label (e.g. "200g de boeuf") to a [`PriceFamily`].
//! Families are tried in [`PriceFamily::PRIORITY`] order and the first family
//! with a keyword contained in the lowercased label wins. Matching is plain
//! substring containment, so "ail" also matches "caille"; that is accepted.

use super::types::PriceFamily;
use indexmap::IndexMap;

/// Keyword lists per price family. Total over every family except `Other`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable {
    families: IndexMap<PriceFamily, Vec<String>>,
}

const MEAT_RED: &[&str] = &[
    "boeuf", "bœuf", "steak", "porc", "lard", "jambon", "saucisse", "veau", "agneau", "chorizo",
    "merguez", "viande", "bacon", "lardon",
];
const POULTRY: &[&str] = &[
    "poulet", "dinde", "canard", "oie", "volaille", "chapon", "cuisse", "blanc de",
];
const FISH: &[&str] = &[
    "poisson", "saumon", "thon", "crevette", "moule", "cabillaud", "fruit de mer", "calamar",
    "truite",
];
const VEGETABLE: &[&str] = &[
    "tomate", "oignon", "carotte", "courgette", "aubergine", "poivron", "ail", "échalote",
    "echalote", "champignon", "salade", "épinard", "haricot", "pois", "pomme de terre", "patate",
    "chou", "poireau", "avocat", "concombre",
];
const FRUIT: &[&str] = &[
    "pomme", "poire", "banane", "citron", "orange", "fraise", "framboise", "ananas", "fruit",
    "zeste",
];
const STARCH: &[&str] = &[
    "riz", "pâte", "spaghetti", "nouille", "blé", "semoule", "quinoa", "pain", "baguette", "toast",
    "farine", "galette", "tortilla",
];
const DAIRY: &[&str] = &[
    "lait", "crème", "beurre", "yaourt", "fromage", "gruyère", "parmesan", "mozzarella", "comté",
    "cheddar", "emmental",
];
const SWEET_GROCERY: &[&str] = &[
    "sucre", "miel", "sirop", "chocolat", "cacao", "confiture", "maïzena", "levure", "vanille",
];
const CONDIMENT: &[&str] = &[
    "sel", "poivre", "huile", "vinaigre", "sauce", "soja", "moutarde", "ketchup", "mayonnaise",
    "cube", "bouillon", "vin", "alcool", "rhum", "eau",
];
const AROMATIC: &[&str] = &[
    "gingembre", "persil", "basilic", "thym", "laurier", "coriandre", "menthe", "épice", "curry",
    "paprika", "cumin", "cannelle", "herbe", "piment", "quatre-épices", "origan",
];

impl Default for KeywordTable {
    /// The stock French grocery taxonomy.
    fn default() -> Self {
        let stock: [(PriceFamily, &[&str]); 10] = [
            (PriceFamily::MeatRed, MEAT_RED),
            (PriceFamily::Poultry, POULTRY),
            (PriceFamily::Fish, FISH),
            (PriceFamily::Vegetable, VEGETABLE),
            (PriceFamily::Fruit, FRUIT),
            (PriceFamily::Starch, STARCH),
            (PriceFamily::Dairy, DAIRY),
            (PriceFamily::SweetGrocery, SWEET_GROCERY),
            (PriceFamily::Condiment, CONDIMENT),
            (PriceFamily::Aromatic, AROMATIC),
        ];
        let mut table = Self::empty();
        for (family, words) in stock {
            table
                .families
                .insert(family, words.iter().map(|w| w.to_string()).collect());
        }
        table
    }
}

impl KeywordTable {
    /// A table where every family has no keywords; everything classifies as `Other`.
    pub fn empty() -> Self {
        Self {
            families: PriceFamily::PRIORITY
                .into_iter()
                .map(|family| (family, Vec::new()))
                .collect(),
        }
    }

    /// Replace the keyword lists of the given families. Keywords are trimmed
    /// and lowercased.
    pub fn apply_overrides(
        &mut self,
        overrides: &IndexMap<PriceFamily, Vec<String>>,
    ) -> Result<(), String> {
        for (family, words) in overrides {
            if *family == PriceFamily::Other {
                return Err("OTHER is the fallback family and cannot have keywords".to_string());
            }
            let mut folded = Vec::with_capacity(words.len());
            for word in words {
                let word = word.trim().to_lowercase();
                if word.is_empty() {
                    return Err(format!("blank keyword in {} list", family));
                }
                folded.push(word);
            }
            self.families.insert(*family, folded);
        }
        Ok(())
    }

    /// Keywords for one family (empty for `Other`).
    pub fn keywords(&self, family: PriceFamily) -> &[String] {
        self.families
            .get(&family)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Classifies raw ingredient labels against an injected [`KeywordTable`].
#[derive(Debug, Clone, Default)]
pub struct IngredientClassifier {
    table: KeywordTable,
}

impl IngredientClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Return the first family in priority order with a keyword contained in
    /// the lowercased label, or `Other`.
    pub fn identify(&self, raw_name: &str) -> PriceFamily {
        let folded = raw_name.to_lowercase();
        PriceFamily::PRIORITY
            .into_iter()
            .find(|family| {
                self.table
                    .keywords(*family)
                    .iter()
                    .any(|kw| folded.contains(kw.as_str()))
            })
            .unwrap_or(PriceFamily::Other)
    }
}
