//! Property tests for round aggregation (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::resolution::{
    aggregate, compose_public_results, ResolutionDraws, ASSISTANT_FACTOR_MAX,
    ASSISTANT_FACTOR_MIN, SENTIMENT_BOUND,
};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Stakeholder influence is the factor times the assistant total.
    #[test]
    fn prop_stakeholder_is_factor_times_sum(moves in test_gens::moves(), draws in test_gens::draws()) {
        let deltas = aggregate(&moves, draws);
        let total: u64 = moves.iter().map(|m| u64::from(m.assistants_allocated)).sum();
        let expected = total as f64 * draws.assistant_factor;
        prop_assert!((deltas.stakeholder_influence - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    /// Policy quality is a tenth of the resource total, whatever the move order.
    #[test]
    fn prop_policy_is_order_independent(moves in test_gens::moves(), draws in test_gens::draws()) {
        let forward = aggregate(&moves, draws);
        let mut reversed_moves = moves.clone();
        reversed_moves.reverse();
        let reversed = aggregate(&reversed_moves, draws);

        let total: u64 = moves.iter().map(|m| u64::from(m.resources)).sum();
        prop_assert_eq!(forward.policy_quality, total as f64 * 0.1);
        prop_assert_eq!(forward, reversed);
    }

    /// Unit samples always land inside the draw ranges.
    #[test]
    fn prop_draws_in_range(u_factor in 0.0f64..1.0, u_sentiment in 0.0f64..1.0) {
        let d = ResolutionDraws::from_unit(u_factor, u_sentiment);
        prop_assert!(d.assistant_factor >= ASSISTANT_FACTOR_MIN);
        prop_assert!(d.assistant_factor < ASSISTANT_FACTOR_MAX);
        prop_assert!((-SENTIMENT_BOUND..=SENTIMENT_BOUND).contains(&d.public_sentiment_delta));
    }

    /// The narrative reports the sentiment magnitude and direction faithfully.
    #[test]
    fn prop_narrative_sentiment(moves in test_gens::moves(), draws in test_gens::draws()) {
        let deltas = aggregate(&moves, draws);
        let text = compose_public_results(&deltas);
        let word = if deltas.public_sentiment >= 0 { "improved" } else { "declined" };
        let expected = format!("Public sentiment {} by {}.", word, deltas.public_sentiment.abs());
        prop_assert!(text.contains(&expected), "{} missing from {}", expected, text);
        prop_assert!(text.starts_with("Stakeholder influence changed by "));
        prop_assert!(text.ends_with('.'));
    }
}
