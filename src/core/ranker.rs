//! DC-006: Candidate ranking — cheapest recipe wins.

use super::error::PricingError;
use super::types::{RankedComparison, RecipeCostResult};

/// Rank costed candidates. The winner is the minimum total; on ties the
/// earliest candidate wins.
pub fn rank(results: Vec<RecipeCostResult>) -> Result<RankedComparison, PricingError> {
    let winner = results
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, r)| match best {
            Some((_, total)) if total <= r.total => best,
            _ => Some((i, r.total)),
        })
        .map(|(i, _)| i)
        .ok_or(PricingError::EmptyCandidateSet)?;

    Ok(RankedComparison {
        candidates: results,
        winner,
    })
}
