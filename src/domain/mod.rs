//! Core domain types and logic.

pub mod price_series;
pub mod indicator;
pub mod indicator_helpers;
pub mod signal;
pub mod holding;
pub mod watchlist;
pub mod portfolio;
pub mod aggregator;
pub mod universe;
pub mod config_validation;
pub mod error;
