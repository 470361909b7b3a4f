//! Core costing logic — types, classification, price index, estimation, ranking.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod estimator;
pub mod parser;
pub mod pipeline;
pub mod price_index;
pub mod ranker;
pub mod types;
