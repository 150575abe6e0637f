//! Dice triples and the validated event built from one observed round.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::label::Label;

/// Lowest value a die face can show.
pub const FACE_MIN: u32 = 1;
/// Highest value a die face can show.
pub const FACE_MAX: u32 = 6;

/// The three faces rolled in one round, in upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    faces: [u32; 3],
}

impl DiceRoll {
    /// Validate three faces. Each must be within 1-6.
    pub fn new(faces: [u32; 3]) -> CoreResult<Self> {
        for (position, &value) in faces.iter().enumerate() {
            if !(FACE_MIN..=FACE_MAX).contains(&value) {
                return Err(CoreError::InvalidFace { position, value });
            }
        }
        Ok(Self { faces })
    }

    /// The individual faces.
    pub fn faces(&self) -> [u32; 3] {
        self.faces
    }

    /// Sum of all three faces (3-18).
    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }

    /// The label this roll classifies as.
    pub fn label(&self) -> Label {
        Label::classify_total(self.total())
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.faces;
        write!(f, "[{a}, {b}, {c}] = {}", self.total())
    }
}

/// One observed round: its session id, dice, total and label.
///
/// Created once per round and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Upstream session (round) identifier.
    pub session_id: u64,
    /// The dice that were rolled.
    pub dice: DiceRoll,
    /// Sum of the dice.
    pub total: u32,
    /// Classification of the total.
    pub label: Label,
}

impl Event {
    /// Build an event from raw upstream values, rejecting out-of-range
    /// faces and session ids of 0 or `u64::MAX` (the next id must exist).
    pub fn new(session_id: u64, faces: [u32; 3]) -> CoreResult<Self> {
        if session_id == 0 || session_id == u64::MAX {
            return Err(CoreError::InvalidSession(session_id));
        }
        let dice = DiceRoll::new(faces)?;
        Ok(Self {
            session_id,
            dice,
            total: dice.total(),
            label: dice.label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_and_label() {
        let roll = DiceRoll::new([6, 3, 2]).unwrap();
        assert_eq!(roll.total(), 11);
        assert_eq!(roll.label(), Label::High);
    }

    #[test]
    fn rejects_out_of_range_faces() {
        assert_eq!(
            DiceRoll::new([1, 7, 2]),
            Err(CoreError::InvalidFace {
                position: 1,
                value: 7
            })
        );
        assert_eq!(
            DiceRoll::new([0, 1, 2]),
            Err(CoreError::InvalidFace {
                position: 0,
                value: 0
            })
        );
    }

    #[test]
    fn display() {
        let roll = DiceRoll::new([3, 5, 1]).unwrap();
        assert_eq!(roll.to_string(), "[3, 5, 1] = 9");
    }

    #[test]
    fn event_derives_total_and_label() {
        let event = Event::new(1042, [2, 2, 6]).unwrap();
        assert_eq!(event.session_id, 1042);
        assert_eq!(event.total, 10);
        assert_eq!(event.label, Label::Low);
    }

    #[test]
    fn event_rejects_zero_session() {
        assert_eq!(Event::new(0, [1, 2, 3]), Err(CoreError::InvalidSession(0)));
    }

    #[test]
    fn event_rejects_session_without_successor() {
        assert_eq!(
            Event::new(u64::MAX, [1, 2, 3]),
            Err(CoreError::InvalidSession(u64::MAX))
        );
        let last = Event::new(u64::MAX - 1, [1, 2, 3]).unwrap();
        assert_eq!(last.session_id, u64::MAX - 1);
    }
}
