//! Order-1 Markov prediction with streak correction and confidence scoring.
//!
//! The transition matrix is rebuilt from the full history on every call,
//! which is O(history) per prediction. Histories are bounded by the store's
//! capacity, so this stays cheap.

use hilo_core::Label;
use serde::Serialize;

use crate::pattern::PatternAnalyzer;
use crate::stats::{population_std, round2, share};

/// Label returned when there is no history at all.
pub const COLD_START_LABEL: Label = Label::High;
/// Confidence returned when there is no history at all.
pub const COLD_START_CONFIDENCE: f64 = 15.0;
/// Explanation returned when there is no history at all.
pub const COLD_START_EXPLANATION: &str = "Initial prediction: theoretical balance.";

/// Streak length at which the reversal correction kicks in.
pub const STREAK_TRIGGER: usize = 3;
/// Correction added per streak step.
pub const STREAK_BOOST_PER_STEP: f64 = 0.1;
/// Upper bound on the correction.
pub const MAX_STREAK_BOOST: f64 = 0.2;
/// History length from which confidence uses the stability formula.
pub const STABILITY_MIN_HISTORY: usize = 10;
/// The two recent windows compared by the stability formula.
pub const STABILITY_WINDOWS: [usize; 2] = [5, 10];

fn index(label: Label) -> usize {
    match label {
        Label::High => 0,
        Label::Low => 1,
    }
}

/// Next-label probabilities out of one state.
///
/// After streak correction the values may leave `[0, 1]`; no
/// renormalization is performed. `first` is the successor that was observed
/// first while counting; it wins exact ties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionRow {
    /// Probability of `High` next.
    pub high: f64,
    /// Probability of `Low` next.
    pub low: f64,
    #[serde(skip)]
    first: Label,
}

impl TransitionRow {
    /// A row with explicit probabilities. `High` wins ties.
    pub fn new(high: f64, low: f64) -> Self {
        Self {
            high,
            low,
            first: Label::ALL[0],
        }
    }

    /// The same row with `label` winning ties.
    pub fn with_first(mut self, label: Label) -> Self {
        self.first = label;
        self
    }

    /// The label that wins an exact tie.
    pub fn first(&self) -> Label {
        self.first
    }

    /// Probability of `label` next.
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::High => self.high,
            Label::Low => self.low,
        }
    }

    /// Sum of both entries.
    pub fn sum(&self) -> f64 {
        self.high + self.low
    }

    /// The most likely label and its probability. Ties go to
    /// [`first`](Self::first).
    pub fn argmax(&self) -> (Label, f64) {
        let (first, second) = (self.first, self.first.opposite());
        if self.get(second) > self.get(first) {
            (second, self.get(second))
        } else {
            (first, self.get(first))
        }
    }

    /// A new row with `boost` moved from `predicted` to its opposite.
    pub fn with_reversal_boost(&self, predicted: Label, boost: f64) -> Self {
        let mut adjusted = *self;
        adjusted.set(predicted.opposite(), self.get(predicted.opposite()) + boost);
        adjusted.set(predicted, self.get(predicted) - boost);
        adjusted
    }

    fn set(&mut self, label: Label, value: f64) {
        match label {
            Label::High => self.high = value,
            Label::Low => self.low = value,
        }
    }
}

/// Order-1 transition counts and probabilities between labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    counts: [[u32; 2]; 2],
    rows: [TransitionRow; 2],
}

impl TransitionMatrix {
    /// Count every adjacent pair of `labels_oldest_first` and normalize.
    ///
    /// A state never seen as a predecessor falls back to the unconditional
    /// label frequency over the whole input, or 0.5/0.5 if it is empty.
    /// Each counted row remembers which successor it saw first.
    pub fn from_chronological(labels_oldest_first: &[Label]) -> Self {
        let mut counts = [[0u32; 2]; 2];
        let mut first_seen: [Option<Label>; 2] = [None; 2];
        for pair in labels_oldest_first.windows(2) {
            counts[index(pair[0])][index(pair[1])] += 1;
            let seen = &mut first_seen[index(pair[0])];
            if seen.is_none() {
                *seen = Some(pair[1]);
            }
        }

        let fallback = if labels_oldest_first.is_empty() {
            TransitionRow::new(0.5, 0.5)
        } else {
            TransitionRow::new(
                share(labels_oldest_first, Label::High),
                share(labels_oldest_first, Label::Low),
            )
        };

        let rows = Label::ALL.map(|from| {
            let row = counts[index(from)];
            let total: u32 = row.iter().sum();
            if total > 0 {
                let normalized = TransitionRow::new(
                    f64::from(row[index(Label::High)]) / f64::from(total),
                    f64::from(row[index(Label::Low)]) / f64::from(total),
                );
                match first_seen[index(from)] {
                    Some(label) => normalized.with_first(label),
                    None => normalized,
                }
            } else {
                fallback
            }
        });

        Self { counts, rows }
    }

    /// Number of observed `from -> to` transitions.
    pub fn count(&self, from: Label, to: Label) -> u32 {
        self.counts[index(from)][index(to)]
    }

    /// Number of observed transitions out of `from`.
    pub fn outgoing(&self, from: Label) -> u32 {
        self.counts[index(from)].iter().sum()
    }

    /// The probability row out of `from`.
    pub fn row(&self, from: Label) -> TransitionRow {
        self.rows[index(from)]
    }

    /// `P(to | from)`.
    pub fn probability(&self, from: Label, to: Label) -> f64 {
        self.row(from).get(to)
    }
}

/// Everything the predictor worked out for one history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted label for the next round.
    pub label: Label,
    /// Confidence, rounded to two decimals.
    pub confidence: f64,
    /// Probability of `label` in the working row.
    pub max_probability: f64,
    /// Most recent label, `None` on cold start.
    pub last_state: Option<Label>,
    /// Length of the current streak of `last_state`.
    pub streak_run: usize,
    /// Transition row out of `last_state` before correction.
    pub base_row: Option<TransitionRow>,
    /// Row after streak correction, if it was applied.
    pub adjusted_row: Option<TransitionRow>,
    /// Rationale text.
    pub explanation: String,
}

impl Prediction {
    fn cold_start() -> Self {
        Self {
            label: COLD_START_LABEL,
            confidence: COLD_START_CONFIDENCE,
            max_probability: 0.5,
            last_state: None,
            streak_run: 0,
            base_row: None,
            adjusted_row: None,
            explanation: COLD_START_EXPLANATION.to_string(),
        }
    }

    /// Whether the streak correction changed the working row.
    pub fn streak_adjusted(&self) -> bool {
        self.adjusted_row.is_some()
    }
}

/// Order-1 Markov predictor.
#[derive(Debug, Clone, Default)]
pub struct MarkovPredictor {
    analyzer: PatternAnalyzer,
}

impl MarkovPredictor {
    /// Create a predictor with the default analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom analyzer for the rationale text.
    pub fn with_analyzer(mut self, analyzer: PatternAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Predict the label after `labels_recent_first[0]`.
    ///
    /// The input is most recent first, the order the history buffer keeps.
    /// It is reversed once for transition counting and the analyzer. The
    /// first element is the state the prediction starts from, and the
    /// confidence windows are read from the tail of the input as received.
    pub fn predict(&self, labels_recent_first: &[Label]) -> Prediction {
        let Some(&last_state) = labels_recent_first.first() else {
            return Prediction::cold_start();
        };

        let chronological: Vec<Label> = labels_recent_first.iter().rev().copied().collect();
        let matrix = TransitionMatrix::from_chronological(&chronological);

        let base_row = matrix.row(last_state);
        let (mut label, mut max_probability) = base_row.argmax();

        let streak_run = streak_run(labels_recent_first);
        let adjusted_row = (streak_run >= STREAK_TRIGGER).then(|| {
            let boost = (streak_run as f64 * STREAK_BOOST_PER_STEP).min(MAX_STREAK_BOOST);
            base_row.with_reversal_boost(label, boost)
        });
        if let Some(row) = adjusted_row {
            (label, max_probability) = row.argmax();
        }

        let confidence = confidence(labels_recent_first, max_probability);

        let mut explanation = self.analyzer.explain(&chronological);
        explanation.push_str(&format!(
            " Markov chain predicts {label} (probability {:.1}%, streak-adjusted). \
             Confidence reflects historical stability.",
            max_probability * 100.0
        ));

        Prediction {
            label,
            confidence,
            max_probability,
            last_state: Some(last_state),
            streak_run,
            base_row: Some(base_row),
            adjusted_row,
            explanation,
        }
    }
}

/// Length of the run of `labels_recent_first[0]` at the start of the input.
pub fn streak_run(labels_recent_first: &[Label]) -> usize {
    match labels_recent_first.first() {
        Some(&first) => labels_recent_first
            .iter()
            .take_while(|&&l| l == first)
            .count(),
        None => 0,
    }
}

/// Confidence for a prediction with probability `max_probability`.
///
/// Short histories get `p * 35 + 15`. From [`STABILITY_MIN_HISTORY`] labels
/// on, the `High` share over the last 5 and last 10 elements of the input is
/// compared and `stability = 1 - std` scales the result:
/// `p * (50 + 50 * stability)`. The input is most recent first, so these
/// windows hold the oldest labels.
pub fn confidence(labels_recent_first: &[Label], max_probability: f64) -> f64 {
    let n = labels_recent_first.len();
    let raw = if n >= STABILITY_MIN_HISTORY {
        let shares = STABILITY_WINDOWS.map(|w| share(&labels_recent_first[n - w..], Label::High));
        let stability = 1.0 - population_std(&shares);
        max_probability * (50.0 + stability * 50.0)
    } else {
        max_probability * 35.0 + 15.0
    };
    round2(raw)
}
