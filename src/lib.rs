//! buyzone: buy-zone dashboard for a personal stock portfolio.
//!
//! Computes trend and momentum indicators from daily closes, classifies each
//! ticker into a buy-zone signal and aggregates holdings, a ranked watchlist
//! and portfolio totals.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
