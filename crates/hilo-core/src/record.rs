//! What the service keeps per game variant: history records and the
//! latest snapshot.

use serde::{Deserialize, Serialize};

use crate::dice::Event;
use crate::error::{CoreError, CoreResult};
use crate::label::Label;

/// A game variant with its own independent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// The regular table.
    #[serde(rename = "taixiu")]
    Classic,
    /// The MD5-verified table.
    #[serde(rename = "taixiumd5")]
    Md5,
}

impl Variant {
    /// Both variants in lock order. Code that holds both variants at once
    /// must acquire them in this order.
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Md5];

    /// Stable identifier used in API paths and serialized records.
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "taixiu",
            Self::Md5 => "taixiumd5",
        }
    }

    /// The upstream game id polled for this variant.
    pub fn gid(self) -> &'static str {
        match self {
            Self::Classic => "vgmn_100",
            Self::Md5 => "vgmn_101",
        }
    }

    /// Parse a variant from its id or a short alias (`classic`, `md5`).
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "taixiu" | "classic" | "tx" => Ok(Self::Classic),
            "taixiumd5" | "md5" => Ok(Self::Md5),
            other => Err(CoreError::UnknownVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One element of a variant's history: an observed round enriched with the
/// prediction made for the round after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Session id of the observed round.
    pub current_session: u64,
    /// Sum of the dice.
    pub dice_sum: u32,
    /// Observed label.
    pub label: Label,
    /// Always `current_session + 1`.
    pub next_session: u64,
    /// Label predicted for `next_session`.
    pub predicted_label: Label,
    /// Confidence in the prediction, 0-100, two decimals.
    pub confidence: f64,
    /// Human-readable rationale.
    pub explanation: String,
    /// The variant this record belongs to.
    pub variant: Variant,
}

impl ResultRecord {
    /// Enrich an event with a prediction.
    pub fn from_event(
        event: &Event,
        variant: Variant,
        predicted_label: Label,
        confidence: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            current_session: event.session_id,
            dice_sum: event.total,
            label: event.label,
            next_session: event.session_id + 1,
            predicted_label,
            confidence,
            explanation: explanation.into(),
            variant,
        }
    }
}

/// Explanation shown before a variant has seen its first round.
pub const NO_DATA_EXPLANATION: &str = "No data yet.";

/// The current state of one variant. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSnapshot {
    /// Session id of the last observed round (0 before the first).
    pub current_session: u64,
    /// Sum of the dice of the last round.
    pub dice_sum: u32,
    /// Label of the last round, if any.
    pub label: Option<Label>,
    /// Session the prediction is for.
    pub next_session: u64,
    /// Predicted label, if any.
    pub predicted_label: Option<Label>,
    /// Confidence in the prediction, 0-100.
    pub confidence: f64,
    /// Human-readable rationale.
    pub explanation: String,
    /// The variant this snapshot belongs to.
    pub variant: Variant,
}

impl LatestSnapshot {
    /// The snapshot of a variant that has not observed anything yet.
    pub fn empty(variant: Variant) -> Self {
        Self {
            current_session: 0,
            dice_sum: 0,
            label: None,
            next_session: 0,
            predicted_label: None,
            confidence: 0.0,
            explanation: NO_DATA_EXPLANATION.to_string(),
            variant,
        }
    }

    /// Whether this snapshot still holds the pre-first-round placeholder.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
    }
}

impl From<&ResultRecord> for LatestSnapshot {
    fn from(record: &ResultRecord) -> Self {
        Self {
            current_session: record.current_session,
            dice_sum: record.dice_sum,
            label: Some(record.label),
            next_session: record.next_session,
            predicted_label: Some(record.predicted_label),
            confidence: record.confidence,
            explanation: record.explanation.clone(),
            variant: record.variant,
        }
    }
}
