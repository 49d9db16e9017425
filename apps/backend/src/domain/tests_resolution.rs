use crate::domain::resolution::{
    aggregate, compose_public_results, HiddenVariable, MoveInput, ResolutionDraws, RoundDeltas,
};

fn draws(factor: f64, sentiment: i32) -> ResolutionDraws {
    ResolutionDraws {
        assistant_factor: factor,
        public_sentiment_delta: sentiment,
    }
}

#[test]
fn test_reference_scenario() {
    let moves = [MoveInput::new(4, 10), MoveInput::new(2, 0)];
    let deltas = aggregate(&moves, draws(1.0, 5));

    assert_eq!(deltas.stakeholder_influence, 6.0);
    assert_eq!(deltas.public_sentiment, 5);
    assert!((deltas.policy_quality - 1.0).abs() < 1e-12);
    assert_eq!(
        compose_public_results(&deltas),
        "Stakeholder influence changed by 6.0. Public sentiment improved by 5. Policy quality changed by 1.0."
    );
}

#[test]
fn test_zero_moves_yield_zero_continuous_deltas() {
    let deltas = aggregate(&[], draws(1.17, -3));
    assert_eq!(deltas.stakeholder_influence, 0.0);
    assert_eq!(deltas.policy_quality, 0.0);
    assert_eq!(deltas.public_sentiment, -3);
    assert_eq!(
        compose_public_results(&deltas),
        "Stakeholder influence changed by 0.0. Public sentiment declined by 3. Policy quality changed by 0.0."
    );
}

#[test]
fn test_zero_sentiment_reads_as_improved() {
    let deltas = RoundDeltas {
        stakeholder_influence: 2.345,
        public_sentiment: 0,
        policy_quality: 0.25,
    };
    let text = compose_public_results(&deltas);
    assert!(text.contains("Public sentiment improved by 0."));
    assert!(text.starts_with("Stakeholder influence changed by 2.3."));
}

#[test]
fn test_extreme_sentiment_magnitude() {
    let deltas = aggregate(&[MoveInput::default()], draws(0.7, -10));
    assert!(compose_public_results(&deltas).contains("declined by 10."));
}

#[test]
fn test_from_unit_endpoints() {
    let low = ResolutionDraws::from_unit(0.0, 0.0);
    assert_eq!(low.assistant_factor, 0.7);
    assert_eq!(low.public_sentiment_delta, -10);

    let high = ResolutionDraws::from_unit(0.999_999, 0.999_999);
    assert!(high.assistant_factor < 1.3);
    assert_eq!(high.public_sentiment_delta, 10);

    let mid = ResolutionDraws::from_unit(0.5, 0.5);
    assert!((mid.assistant_factor - 1.0).abs() < 1e-12);
    assert_eq!(mid.public_sentiment_delta, 0);
}

#[test]
fn test_from_unit_rounds_halves_up() {
    // 0.375 * 20 - 10 = -2.5 rounds to -2; 0.625 * 20 - 10 = 2.5 rounds to 3
    assert_eq!(ResolutionDraws::from_unit(0.0, 0.375).public_sentiment_delta, -2);
    assert_eq!(ResolutionDraws::from_unit(0.0, 0.625).public_sentiment_delta, 3);
}

#[test]
fn test_from_unit_clamps_out_of_range_samples() {
    let d = ResolutionDraws::from_unit(7.0, f64::NAN);
    assert!(d.assistant_factor < 1.3);
    assert_eq!(d.public_sentiment_delta, -10);
}

#[test]
fn test_entries_cover_every_variable_once() {
    let deltas = aggregate(&[MoveInput::new(3, 7)], draws(1.1, 2));
    let entries = deltas.entries();
    let names: Vec<_> = entries.iter().map(|(v, _)| *v).collect();
    assert_eq!(names, HiddenVariable::ALL.to_vec());
    assert_eq!(entries[1].1, 2.0);
}
