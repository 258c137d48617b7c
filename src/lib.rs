//! A playoff-race engine for divisional leagues: mathematical clinch detection and
//! Monte Carlo playoff-qualification probabilities, derived from a snapshot of the
//! current standings and a batch of correlated, simulated season outcomes.

#![allow(clippy::too_many_arguments)]

pub mod clinch;
pub mod data;
pub mod engine;
pub mod league;
pub mod print;
pub mod rank;
pub mod sim;
pub mod standings;
pub mod threshold;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
