use hilo_core::{Event, LatestSnapshot, ResultRecord, Variant};
use hilo_predict::MarkovPredictor;
use serde::Serialize;

use crate::config::SessionConfig;
use crate::history::HistoryBuffer;

/// What happened to an event handed to [`VariantState::ingest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IngestOutcome {
    /// The event was new and this record was appended.
    Applied(ResultRecord),
    /// The event repeats the last processed session and was ignored.
    Duplicate {
        /// The repeated session id.
        session_id: u64,
    },
}

impl IngestOutcome {
    /// The appended record, if the event was applied.
    pub fn record(&self) -> Option<&ResultRecord> {
        match self {
            Self::Applied(record) => Some(record),
            Self::Duplicate { .. } => None,
        }
    }

    /// Whether the event was ignored as a repeat.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// One variant's history, latest snapshot and last processed session.
///
/// These three always change together; callers hold one lock around the
/// whole state.
#[derive(Debug, Clone)]
pub struct VariantState {
    variant: Variant,
    snapshot: LatestSnapshot,
    history: HistoryBuffer,
    last_session: Option<u64>,
    predictor: MarkovPredictor,
}

impl VariantState {
    /// Create an empty state for `variant`.
    pub fn new(variant: Variant, config: &SessionConfig) -> Self {
        Self {
            variant,
            snapshot: LatestSnapshot::empty(variant),
            history: HistoryBuffer::new(config.capacity),
            last_session: None,
            predictor: MarkovPredictor::new(),
        }
    }

    /// Apply `event` unless it repeats the last processed session.
    pub fn ingest(&mut self, event: &Event) -> IngestOutcome {
        if self.last_session == Some(event.session_id) {
            return IngestOutcome::Duplicate {
                session_id: event.session_id,
            };
        }
        IngestOutcome::Applied(self.update(event))
    }

    /// Record `event` and refresh the prediction.
    ///
    /// The prediction is computed from the history as it was *before* this
    /// event; the enriched record is appended afterwards. The snapshot is
    /// replaced wholesale. Returns the appended record.
    pub fn update(&mut self, event: &Event) -> ResultRecord {
        let prediction = self.predictor.predict(&self.history.labels_recent_first());
        let record = ResultRecord::from_event(
            event,
            self.variant,
            prediction.label,
            prediction.confidence,
            prediction.explanation,
        );

        self.snapshot = LatestSnapshot::from(&record);
        self.history.push_front(record.clone());
        self.last_session = Some(event.session_id);
        record
    }

    /// The variant this state belongs to.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &LatestSnapshot {
        &self.snapshot
    }

    /// The history, most recent first.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// The last processed session id.
    pub fn last_session(&self) -> Option<u64> {
        self.last_session
    }
}
