//! dishcost — what does this dish cost to cook here?
//!
//! Classifies recipe ingredients into price families, prices them against a
//! city's cost-of-living index, and ranks recipe candidates by estimated cost.

pub mod cli;
pub mod core;
pub mod report;
pub mod sources;
