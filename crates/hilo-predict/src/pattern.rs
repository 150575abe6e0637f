//! Descriptive statistics over the recent window of a label history.
//!
//! The analyzer works on the last [`RECENT_WINDOW`] labels only. It computes
//! a [`PatternStats`] value first and renders text from it second, so callers
//! and tests can look at the numbers without parsing prose.

use hilo_core::Label;
use serde::Serialize;

use crate::stats::{mean, population_std, share};

/// Number of most recent labels the analyzer looks at.
pub const RECENT_WINDOW: usize = 20;

/// Rendered when fewer than two labels are available.
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Not enough data. Baseline: 50% High / 50% Low. Keep watching to spot streaks.";

/// A maximal run of identical consecutive labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    /// The repeated label.
    pub label: Label,
    /// How many times in a row it appeared.
    pub len: usize,
}

/// How often a two-label pattern such as `"HL"` occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternCount {
    /// Concatenated label codes, oldest first.
    pub pattern: String,
    /// Number of occurrences in the window.
    pub count: usize,
}

/// Statistics over one recent window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternStats {
    /// Number of labels in the window.
    pub window_len: usize,
    /// Share of `High` labels, in percent.
    pub high_pct: f64,
    /// Share of `Low` labels, in percent.
    pub low_pct: f64,
    /// Runs in chronological order.
    pub runs: Vec<Run>,
    /// Length of the final run.
    pub current_streak: usize,
    /// Label of the final run.
    pub current_label: Label,
    /// Mean run length.
    pub streak_mean: f64,
    /// Population standard deviation of run lengths.
    pub streak_std: f64,
    /// Single alternations right after a run of two or more, in percent.
    pub reversal_rate_1: f64,
    /// A-B-A alternations, in percent.
    pub reversal_rate_2: f64,
    /// Most frequent consecutive pair, first encountered wins ties.
    pub top_pattern: Option<PatternCount>,
}

impl PatternStats {
    /// Compute statistics over `window` (oldest first).
    ///
    /// Returns `None` for an empty window.
    pub fn compute(window: &[Label]) -> Option<Self> {
        let runs = runs(window);
        let last = *runs.last()?;
        let lengths: Vec<f64> = runs.iter().map(|r| r.len as f64).collect();

        Some(Self {
            window_len: window.len(),
            high_pct: share(window, Label::High) * 100.0,
            low_pct: share(window, Label::Low) * 100.0,
            current_streak: last.len,
            current_label: last.label,
            streak_mean: mean(&lengths),
            streak_std: population_std(&lengths),
            reversal_rate_1: single_reversal_rate(window),
            reversal_rate_2: double_reversal_rate(window),
            top_pattern: pair_counts(window).into_iter().reduce(|best, next| {
                if next.count > best.count { next } else { best }
            }),
            runs,
        })
    }

    /// Streak length above which a reversal becomes more likely.
    pub fn reversal_threshold(&self) -> f64 {
        self.streak_mean + self.streak_std
    }

    /// Render the statistics as commentary.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Recent frequency: High {:.1}%, Low {:.1}%. ",
            self.high_pct, self.low_pct
        );
        out.push_str(&format!(
            "Current streak: {} x {} (mean {:.1}, std {:.1}). ",
            self.current_streak, self.current_label, self.streak_mean, self.streak_std
        ));
        out.push_str(&format!(
            "Reversal rate 1-1: {:.1}%, 2-2: {:.1}%. ",
            self.reversal_rate_1, self.reversal_rate_2
        ));
        if let Some(top) = self.top_pattern.as_ref().filter(|t| t.count > 1) {
            out.push_str(&format!(
                "Most common pattern: {} ({} times). ",
                top.pattern, top.count
            ));
        }
        out.push_str(&format!(
            "Trend: a streak longer than {:.0} tends to reverse. \
             Markov hint: watch transitions out of {}.",
            self.reversal_threshold(),
            self.current_label
        ));
        out
    }
}

/// The analyzer's verdict on a history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PatternReport {
    /// Fewer than two labels.
    Insufficient,
    /// Statistics over the recent window.
    Stats(PatternStats),
}

impl PatternReport {
    /// The statistics, if there were enough labels.
    pub fn stats(&self) -> Option<&PatternStats> {
        match self {
            Self::Insufficient => None,
            Self::Stats(stats) => Some(stats),
        }
    }

    /// Render as commentary.
    pub fn render(&self) -> String {
        match self {
            Self::Insufficient => INSUFFICIENT_DATA_MESSAGE.to_string(),
            Self::Stats(stats) => stats.render(),
        }
    }
}

impl std::fmt::Display for PatternReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Streak and pattern analyzer over a bounded recent window.
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    window: usize,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self {
            window: RECENT_WINDOW,
        }
    }
}

impl PatternAnalyzer {
    /// Create an analyzer with the default window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size (at least 2).
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(2);
        self
    }

    /// The configured window size.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Analyze `labels_oldest_first`.
    pub fn analyze(&self, labels_oldest_first: &[Label]) -> PatternReport {
        let n = labels_oldest_first.len();
        if n < 2 {
            return PatternReport::Insufficient;
        }
        let recent = &labels_oldest_first[n - n.min(self.window)..];
        match PatternStats::compute(recent) {
            Some(stats) => PatternReport::Stats(stats),
            None => PatternReport::Insufficient,
        }
    }

    /// Analyze and render in one step.
    pub fn explain(&self, labels_oldest_first: &[Label]) -> String {
        self.analyze(labels_oldest_first).render()
    }
}

/// Split `window` into maximal runs of identical labels.
pub fn runs(window: &[Label]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &label in window {
        match runs.last_mut() {
            Some(run) if run.label == label => run.len += 1,
            _ => runs.push(Run { label, len: 1 }),
        }
    }
    runs
}

/// Percentage of interior positions that break a run of two or more.
///
/// Candidates are positions `1..=len-2`; position 1 never qualifies since it
/// has no second predecessor. The denominator is `len - 2`.
fn single_reversal_rate(window: &[Label]) -> f64 {
    let len = window.len();
    if len <= 2 {
        return 0.0;
    }
    let hits = (2..len - 1)
        .filter(|&i| window[i] != window[i - 1] && window[i - 1] == window[i - 2])
        .count();
    hits as f64 / (len - 2) as f64 * 100.0
}

/// Percentage of positions closing an A-B-A alternation.
fn double_reversal_rate(window: &[Label]) -> f64 {
    let len = window.len();
    if len <= 2 {
        return 0.0;
    }
    let hits = (2..len)
        .filter(|&i| window[i] == window[i - 2] && window[i - 1] != window[i])
        .count();
    hits as f64 / (len - 2) as f64 * 100.0
}

/// Count every consecutive pair, in order of first appearance.
fn pair_counts(window: &[Label]) -> Vec<PatternCount> {
    let mut counts: Vec<PatternCount> = Vec::new();
    for pair in window.windows(2) {
        let pattern: String = pair.iter().map(|l| l.code()).collect();
        match counts.iter_mut().find(|c| c.pattern == pattern) {
            Some(c) => c.count += 1,
            None => counts.push(PatternCount { pattern, count: 1 }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_core::Label::{High as H, Low as L};

    fn stats(labels: &[Label]) -> PatternStats {
        match PatternAnalyzer::new().analyze(labels) {
            PatternReport::Stats(s) => s,
            PatternReport::Insufficient => panic!("expected stats for {labels:?}"),
        }
    }

    #[test]
    fn insufficient_for_zero_or_one() {
        let analyzer = PatternAnalyzer::new();
        assert_eq!(analyzer.analyze(&[]), PatternReport::Insufficient);
        assert_eq!(analyzer.explain(&[]), INSUFFICIENT_DATA_MESSAGE);
        assert_eq!(analyzer.explain(&[H]), INSUFFICIENT_DATA_MESSAGE);
    }

    #[test]
    fn runs_split_in_order() {
        assert_eq!(
            runs(&[H, H, L, H, H, H, L]),
            vec![
                Run { label: H, len: 2 },
                Run { label: L, len: 1 },
                Run { label: H, len: 3 },
                Run { label: L, len: 1 },
            ]
        );
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn full_statistics() {
        let s = stats(&[H, H, L, H, H, H, L]);
        assert_eq!(s.window_len, 7);
        assert!((s.high_pct - 500.0 / 7.0).abs() < 1e-9);
        assert!((s.low_pct - 200.0 / 7.0).abs() < 1e-9);
        assert_eq!(s.current_streak, 1);
        assert_eq!(s.current_label, L);
        assert!((s.streak_mean - 1.75).abs() < 1e-12);
        assert!((s.streak_std - 0.6875f64.sqrt()).abs() < 1e-12);
        assert!((s.reversal_rate_1 - 20.0).abs() < 1e-9);
        assert!((s.reversal_rate_2 - 20.0).abs() < 1e-9);
        assert_eq!(
            s.top_pattern,
            Some(PatternCount {
                pattern: "HH".into(),
                count: 3
            })
        );
    }

    #[test]
    fn reversal_rates_zero_for_two_labels() {
        let s = stats(&[H, L]);
        assert_eq!(s.reversal_rate_1, 0.0);
        assert_eq!(s.reversal_rate_2, 0.0);
        let s = stats(&[L, L]);
        assert_eq!(s.reversal_rate_1, 0.0);
        assert_eq!(s.reversal_rate_2, 0.0);
    }

    #[test]
    fn single_reversal_ignores_window_edges() {
        // No wraparound: the first and last positions are never candidates.
        let s = stats(&[L, H, L]);
        assert_eq!(s.reversal_rate_1, 0.0);
        assert!((s.reversal_rate_2 - 100.0).abs() < 1e-9);

        let s = stats(&[L, L, H]);
        assert_eq!(s.reversal_rate_1, 0.0);

        let s = stats(&[L, L, H, H]);
        assert!((s.reversal_rate_1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn alternating_is_all_double_reversals() {
        let s = stats(&[H, L, H, L, H, L]);
        assert!((s.reversal_rate_2 - 100.0).abs() < 1e-9);
        assert_eq!(s.reversal_rate_1, 0.0);
        assert_eq!(s.streak_std, 0.0);
    }

    #[test]
    fn window_keeps_most_recent_twenty() {
        let mut labels = vec![L; 5];
        labels.extend(std::iter::repeat_n(H, 20));
        let s = stats(&labels);
        assert_eq!(s.window_len, RECENT_WINDOW);
        assert_eq!(s.high_pct, 100.0);
        assert_eq!(s.current_streak, 20);
        assert_eq!(s.runs.len(), 1);
    }

    #[test]
    fn custom_window() {
        let analyzer = PatternAnalyzer::new().with_window(3);
        let report = analyzer.analyze(&[H, H, H, L, L, L]);
        let s = report.stats().unwrap();
        assert_eq!(s.window_len, 3);
        assert_eq!(s.low_pct, 100.0);
    }

    #[test]
    fn tie_goes_to_first_pattern() {
        let s = stats(&[H, L, L, H]);
        assert_eq!(
            s.top_pattern,
            Some(PatternCount {
                pattern: "HL".into(),
                count: 1
            })
        );
        assert!(!s.render().contains("Most common pattern"));
    }

    #[test]
    fn render_mentions_numbers() {
        let text = stats(&[H, H, L, H, H, H, L]).render();
        assert!(text.starts_with("Recent frequency: High 71.4%, Low 28.6%."));
        assert!(text.contains("Current streak: 1 x Low"));
        assert!(text.contains("Reversal rate 1-1: 20.0%, 2-2: 20.0%."));
        assert!(text.contains("Most common pattern: HH (3 times)."));
        assert!(text.ends_with("watch transitions out of Low."));
    }
}
