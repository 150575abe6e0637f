use hilo_core::{DiceRoll, Event, LOW_MAX_TOTAL, Label, classify};
use proptest::prelude::*;

proptest! {
    #[test]
    fn low_iff_total_at_most_ten(d1 in 1u32..=6, d2 in 1u32..=6, d3 in 1u32..=6) {
        let total = d1 + d2 + d3;
        let label = classify(d1, d2, d3);
        prop_assert_eq!(label == Label::Low, total <= LOW_MAX_TOTAL);
    }

    #[test]
    fn event_agrees_with_classifier(
        session in 1u64..1_000_000,
        d1 in 1u32..=6,
        d2 in 1u32..=6,
        d3 in 1u32..=6,
    ) {
        let event = Event::new(session, [d1, d2, d3]).unwrap();
        prop_assert_eq!(event.total, d1 + d2 + d3);
        prop_assert_eq!(event.label, classify(d1, d2, d3));
    }

    #[test]
    fn faces_above_six_are_rejected(bad in 7u32..100, pos in 0usize..3) {
        let mut faces = [3, 3, 3];
        faces[pos] = bad;
        prop_assert!(DiceRoll::new(faces).is_err());
    }
}

#[test]
fn every_total_from_three_to_eighteen() {
    for total in 3..=18 {
        let expected = if total <= 10 { Label::Low } else { Label::High };
        assert_eq!(Label::classify_total(total), expected, "total {total}");
    }
}
