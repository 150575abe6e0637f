//! Per-variant result histories for hilo.
//!
//! Each game variant owns a [`VariantState`]: a bounded most-recent-first
//! [`HistoryBuffer`], the [`LatestSnapshot`](hilo_core::LatestSnapshot) and
//! the last processed session id. The [`VariantCoordinator`] keeps one state
//! per variant behind its own mutex, so the two variants never contend with
//! each other.

/// Configuration for history stores.
pub mod config;
/// Two variant states behind independent locks.
pub mod coordinator;
/// The bounded most-recent-first history buffer.
pub mod history;
/// One variant's history, snapshot and dedup state.
pub mod store;

/// Re-export of [`config::SessionConfig`].
pub use config::SessionConfig;
/// Re-exports of [`coordinator::VariantCoordinator`] and [`coordinator::HistoryView`].
pub use coordinator::{HistoryView, VariantCoordinator};
/// Re-export of [`history::HistoryBuffer`].
pub use history::HistoryBuffer;
/// Re-exports of [`store::VariantState`] and [`store::IngestOutcome`].
pub use store::{IngestOutcome, VariantState};
