//! Outcome analysis and next-round prediction for hilo.
//!
//! Two pieces, both pure and deterministic:
//!
//! - [`PatternAnalyzer`] describes the recent window of a label history
//!   (frequencies, streaks, reversal rates, repeating pairs) and renders it
//!   as commentary.
//! - [`MarkovPredictor`] builds an order-1 transition matrix over the whole
//!   history, corrects for long streaks, and scores its confidence.
//!
//! ## Ordering contract
//!
//! | Function | Expects |
//! |----------|---------|
//! | [`PatternAnalyzer::analyze`] | oldest first |
//! | [`TransitionMatrix::from_chronological`] | oldest first |
//! | [`MarkovPredictor::predict`] | **most recent first**, as stored by the history buffer |
//! | [`markov::confidence`] | most recent first; its windows are the tail of the input |
//!
//! Swapping the order silently inverts predictions, so each entry point
//! names its order in the parameter.

pub mod markov;
pub mod pattern;
mod stats;

pub use markov::{MarkovPredictor, Prediction, TransitionMatrix, TransitionRow};
pub use pattern::{PatternAnalyzer, PatternCount, PatternReport, PatternStats, Run};
