use std::sync::{Mutex, MutexGuard, PoisonError};

use hilo_core::{Event, LatestSnapshot, ResultRecord, Variant};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::store::{IngestOutcome, VariantState};

/// Both variants' histories, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryView {
    /// History of [`Variant::Classic`].
    #[serde(rename = "taixiu")]
    pub classic: Vec<ResultRecord>,
    /// History of [`Variant::Md5`].
    #[serde(rename = "taixiumd5")]
    pub md5: Vec<ResultRecord>,
}

impl HistoryView {
    /// The history of one variant.
    pub fn get(&self, variant: Variant) -> &[ResultRecord] {
        match variant {
            Variant::Classic => &self.classic,
            Variant::Md5 => &self.md5,
        }
    }
}

/// Owns one [`VariantState`] per variant, each behind its own mutex.
///
/// Every operation locks only what it needs and copies data out before
/// releasing. Operations touching both variants lock them in
/// [`Variant::ALL`] order. A poisoned lock is recovered rather than
/// propagated, so a panic while updating one variant never blocks readers
/// or the other variant.
#[derive(Debug)]
pub struct VariantCoordinator {
    classic: Mutex<VariantState>,
    md5: Mutex<VariantState>,
}

impl Default for VariantCoordinator {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl VariantCoordinator {
    /// Create empty states for both variants.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            classic: Mutex::new(VariantState::new(Variant::Classic, &config)),
            md5: Mutex::new(VariantState::new(Variant::Md5, &config)),
        }
    }

    fn lock(&self, variant: Variant) -> MutexGuard<'_, VariantState> {
        let slot = match variant {
            Variant::Classic => &self.classic,
            Variant::Md5 => &self.md5,
        };
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Route `event` to `variant`, skipping a repeat of its last session.
    pub fn ingest(&self, variant: Variant, event: &Event) -> IngestOutcome {
        self.lock(variant).ingest(event)
    }

    /// Copy of the latest snapshot of `variant`.
    pub fn snapshot(&self, variant: Variant) -> LatestSnapshot {
        self.lock(variant).snapshot().clone()
    }

    /// Copy of the history of `variant`, most recent first.
    pub fn history(&self, variant: Variant) -> Vec<ResultRecord> {
        self.lock(variant).history().to_vec()
    }

    /// Copy of both histories, taken while holding both locks.
    pub fn histories(&self) -> HistoryView {
        let classic = self.lock(Variant::Classic);
        let md5 = self.lock(Variant::Md5);
        HistoryView {
            classic: classic.history().to_vec(),
            md5: md5.history().to_vec(),
        }
    }

    /// Number of records held for `variant`.
    pub fn history_len(&self, variant: Variant) -> usize {
        self.lock(variant).history().len()
    }

    /// The last processed session of `variant`.
    pub fn last_session(&self, variant: Variant) -> Option<u64> {
        self.lock(variant).last_session()
    }
}
