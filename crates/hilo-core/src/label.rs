//! The binary outcome of one round and the classifier that produces it.
//!
//! A round is "Low" when the three dice add up to 10 or less and "High"
//! otherwise ("Xỉu" and "Tài" at the tables this service watches).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest dice total that still counts as [`Label::Low`].
pub const LOW_MAX_TOTAL: u32 = 10;

/// The classification of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Total of 11 or more ("Tài").
    High,
    /// Total of 10 or less ("Xỉu").
    Low,
}

impl Label {
    /// Both labels in their canonical iteration order.
    ///
    /// Anything that breaks ties between labels walks this array and keeps
    /// the first maximum, so `High` wins an exact tie.
    pub const ALL: [Label; 2] = [Label::High, Label::Low];

    /// Classify a dice total.
    pub fn classify_total(total: u32) -> Self {
        if total <= LOW_MAX_TOTAL {
            Self::Low
        } else {
            Self::High
        }
    }

    /// The other label.
    pub fn opposite(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// Single-character code used in pattern strings.
    pub fn code(self) -> char {
        match self {
            Self::High => 'H',
            Self::Low => 'L',
        }
    }

    /// Parse a single-character code.
    ///
    /// Accepts `H`/`L` as well as the table shorthands `T` (Tài) and
    /// `X` (Xỉu), case-insensitive.
    pub fn from_code(c: char) -> CoreResult<Self> {
        match c.to_ascii_uppercase() {
            'H' | 'T' => Ok(Self::High),
            'L' | 'X' => Ok(Self::Low),
            _ => Err(CoreError::InvalidLabel(c)),
        }
    }

    /// Parse a sequence of codes such as `"HHLH"`.
    ///
    /// Whitespace, commas and dashes are ignored so `"H-H-L"` and
    /// `"H, H, L"` parse the same.
    pub fn parse_sequence(s: &str) -> CoreResult<Vec<Self>> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '-')
            .map(Self::from_code)
            .collect()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Classify three dice faces: `Low` if their sum is at most 10, else `High`.
pub fn classify(d1: u32, d2: u32, d3: u32) -> Label {
    Label::classify_total(d1 + d2 + d3)
}
