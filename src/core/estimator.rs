//! DC-004: Per-ingredient cost estimation.
//!
//! Cost = unit price (EUR/kg) × portion (kg) for indexed families, or a flat
//! amount for families the cost-of-living index does not cover.

use super::types::{PriceFamily, PriceIndex};

/// Typical portion of a meat, poultry, fish or vegetable item (150 g).
pub const PORTION_MAIN: f64 = 0.15;
/// Typical portion of a starch item (100 g).
pub const PORTION_STARCH: f64 = 0.10;
/// Typical portion of a dairy item (50 g).
pub const PORTION_DAIRY: f64 = 0.05;
/// Fish is priced as red meat plus this premium.
pub const FISH_PREMIUM: f64 = 1.2;

pub const FLAT_SWEET_GROCERY: f64 = 0.20;
pub const FLAT_CONDIMENT: f64 = 0.10;
pub const FLAT_AROMATIC: f64 = 0.30;
/// Anything without its own rule, including fruit.
pub const FLAT_DEFAULT: f64 = 0.50;

/// Estimated cost of one ingredient of `family` for a household portion.
pub fn estimate(family: PriceFamily, index: &PriceIndex) -> f64 {
    match family {
        PriceFamily::MeatRed => index.red_meat * PORTION_MAIN,
        PriceFamily::Poultry => index.poultry * PORTION_MAIN,
        PriceFamily::Fish => index.red_meat * FISH_PREMIUM * PORTION_MAIN,
        PriceFamily::Vegetable => index.vegetable * PORTION_MAIN,
        PriceFamily::Starch => index.starch * PORTION_STARCH,
        PriceFamily::Dairy => index.dairy * PORTION_DAIRY,
        PriceFamily::SweetGrocery => FLAT_SWEET_GROCERY,
        PriceFamily::Condiment => FLAT_CONDIMENT,
        PriceFamily::Aromatic => FLAT_AROMATIC,
        PriceFamily::Fruit | PriceFamily::Other => FLAT_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_dc004_default_index_costs() {
        let index = PriceIndex::default();
        assert_relative_eq!(estimate(PriceFamily::MeatRed, &index), 2.25);
        assert_relative_eq!(estimate(PriceFamily::Poultry, &index), 1.5);
        assert_relative_eq!(estimate(PriceFamily::Fish, &index), 2.7);
        assert_relative_eq!(estimate(PriceFamily::Vegetable, &index), 0.375);
        assert_relative_eq!(estimate(PriceFamily::Starch, &index), 0.2);
        assert_relative_eq!(estimate(PriceFamily::Dairy, &index), 0.5);
    }

    #[test]
    fn test_dc004_flat_rates_ignore_index() {
        let cheap = PriceIndex {
            red_meat: 1.0,
            poultry: 1.0,
            vegetable: 1.0,
            starch: 1.0,
            dairy: 1.0,
            fruit: 1.0,
        };
        for index in [PriceIndex::default(), cheap] {
            assert_eq!(estimate(PriceFamily::SweetGrocery, &index), 0.20);
            assert_eq!(estimate(PriceFamily::Condiment, &index), 0.10);
            assert_eq!(estimate(PriceFamily::Aromatic, &index), 0.30);
            assert_eq!(estimate(PriceFamily::Other, &index), 0.50);
        }
    }

    #[test]
    fn test_dc004_fruit_uses_default_rate() {
        let mut index = PriceIndex::default();
        index.fruit = 40.0;
        assert_eq!(estimate(PriceFamily::Fruit, &index), FLAT_DEFAULT);
    }

    proptest! {
        #[test]
        fn prop_dc004_fish_is_meat_times_premium(red_meat in 0.01f64..500.0) {
            let index = PriceIndex { red_meat, ..PriceIndex::default() };
            let fish = estimate(PriceFamily::Fish, &index);
            let meat = estimate(PriceFamily::MeatRed, &index);
            prop_assert!((fish - meat * FISH_PREMIUM).abs() <= 1e-9 * fish.max(1.0));
        }

        #[test]
        fn prop_dc004_never_negative(
            red_meat in 0.01f64..500.0,
            poultry in 0.01f64..500.0,
            vegetable in 0.01f64..500.0,
        ) {
            let index = PriceIndex { red_meat, poultry, vegetable, ..PriceIndex::default() };
            for family in PriceFamily::PRIORITY {
                prop_assert!(estimate(family, &index) >= 0.0);
            }
            prop_assert!(estimate(PriceFamily::Other, &index) >= 0.0);
        }
    }
}
