//! DC-003: Price index reconciliation from cost-of-living observations.
//!
//! Folds a sequence of observations over the default index. Each observation
//! label is matched against fixed markers; the first marker that matches picks
//! the field to update. Unparseable prices are skipped.

use super::types::{Observation, PriceIndex};
use tracing::debug;

/// Index field targeted by a label marker, and how it is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    Poultry,
    RedMeat,
    Starch,
    Dairy,
    /// `vegetable = (vegetable + value) / 2`
    VegetableHalving,
}

/// Label markers in evaluation order. Matching is case-sensitive.
const MARKERS: &[(&[&str], Update)] = &[
    (&["Chicken"], Update::Poultry),
    (&["Beef"], Update::RedMeat),
    (&["Rice"], Update::Starch),
    (&["Cheese"], Update::Dairy),
    (&["Tomato", "Potato", "Onion"], Update::VegetableHalving),
];

/// Parse a displayed price like `"10.50 €"` or `"1,234.00 €"`.
///
/// Returns `None` for anything that is not a finite positive number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('€', "").replace(',', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

fn marker_for(label: &str) -> Option<Update> {
    MARKERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
        .map(|(_, update)| *update)
}

impl PriceIndex {
    /// Apply one observed unit price to the index according to its label.
    /// Returns false when the label matches no marker.
    pub fn observe(&mut self, label: &str, value: f64) -> bool {
        match marker_for(label) {
            Some(Update::Poultry) => self.poultry = value,
            Some(Update::RedMeat) => self.red_meat = value,
            Some(Update::Starch) => self.starch = value,
            Some(Update::Dairy) => self.dairy = value,
            Some(Update::VegetableHalving) => self.vegetable = (self.vegetable + value) / 2.0,
            None => return false,
        }
        true
    }
}

/// Build a price index from observations, starting from the defaults.
///
/// Order matters: each vegetable sample halves the distance between the
/// current value and the sample.
pub fn build_index(observations: &[Observation]) -> PriceIndex {
    observations
        .iter()
        .fold(PriceIndex::default(), |mut index, obs| {
            match parse_price(&obs.raw_price) {
                Some(value) => {
                    if index.observe(&obs.label, value) {
                        debug!(label = %obs.label, value, "price observation applied");
                    }
                }
                None => {
                    debug!(label = %obs.label, raw = %obs.raw_price, "skipping malformed price");
                }
            }
            index
        })
}
