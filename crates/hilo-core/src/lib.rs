//! Core types for hilo: outcome labels, dice events, and the records the
//! prediction service keeps per game variant.
//!
//! This crate is the validation boundary. Everything downstream (the
//! predictor, the history store) assumes it only ever sees values built
//! through [`Event::new`] and therefore never fails.

/// Dice triples and validated events.
pub mod dice;
/// Error types used throughout the crate.
pub mod error;
/// The high/low label and the outcome classifier.
pub mod label;
/// History records, latest snapshots, and game variants.
pub mod record;

/// Re-export dice types.
pub use dice::{DiceRoll, Event, FACE_MAX, FACE_MIN};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export label types.
pub use label::{LOW_MAX_TOTAL, Label, classify};
/// Re-export record types.
pub use record::{LatestSnapshot, NO_DATA_EXPLANATION, ResultRecord, Variant};
