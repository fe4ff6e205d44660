//! End-to-end tests for the public rating API
//!
//! These tests exercise the whole crate through `fit_or_evaluate`: the
//! explicit-parameter replay path, the full maximum-likelihood fit path,
//! and the input validation that guards both.

use elo_ladder::{fit_or_evaluate, CompetitorId, OutputMode, RatingError, RatingParameters};

fn pairs(raw: &[(&str, &str)]) -> Vec<(CompetitorId, CompetitorId)> {
    raw.iter()
        .map(|(l, r)| (l.to_string(), r.to_string()))
        .collect()
}

/// Every pair of `n` competitors plays once; lower index always wins.
/// Each competitor plays `n - 1` matches, safely inside the fit schedule
/// for `n <= 20`.
fn round_robin(n: usize) -> (Vec<(CompetitorId, CompetitorId)>, Vec<f64>, Vec<bool>) {
    let mut ids = Vec::new();
    let mut outcomes = Vec::new();
    let mut flags = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            ids.push((format!("c{i}"), format!("c{j}")));
            outcomes.push(1.0);
            flags.push(j % 2 == 0);
        }
    }
    (ids, outcomes, flags)
}

#[test]
fn explicit_params_reproduce_the_worked_example() {
    let ids = pairs(&[("A", "B")]);
    let params = RatingParameters::new(vec![0, 5, 10, 15, 20], vec![32.0; 5], 0.0).unwrap();

    let output = fit_or_evaluate(
        &ids,
        &[1.0],
        Some(&[false]),
        OutputMode::Ratings,
        Some(params),
    )
    .unwrap();

    let table = output.as_ratings().unwrap();
    assert!((table["A"].rating - 1016.0).abs() < 1e-9);
    assert!((table["B"].rating - 984.0).abs() < 1e-9);
}

#[test]
fn full_fit_produces_a_complete_rating_table() {
    let (ids, outcomes, flags) = round_robin(8);

    let output = fit_or_evaluate(&ids, &outcomes, Some(&flags), OutputMode::Ratings, None).unwrap();
    let table = output.as_ratings().unwrap();

    assert_eq!(table.len(), 8);
    for state in table.values() {
        assert_eq!(state.matches_played, 7);
    }
}

#[test]
fn full_fit_log_loss_is_non_negative_and_repeatable() {
    let (ids, outcomes, flags) = round_robin(6);

    let first = fit_or_evaluate(&ids, &outcomes, Some(&flags), OutputMode::LogLoss, None)
        .unwrap()
        .as_log_loss()
        .unwrap();
    let second = fit_or_evaluate(&ids, &outcomes, Some(&flags), OutputMode::LogLoss, None)
        .unwrap()
        .as_log_loss()
        .unwrap();

    assert!(first >= 0.0);
    // Fixed implementation, fixed floating-point environment: the fit is
    // deterministic, so two runs agree bit for bit.
    assert_eq!(first, second);
}

#[test]
fn fitted_parameters_explain_the_data_at_least_as_well_as_the_guess() {
    let (ids, outcomes, flags) = round_robin(7);

    let fitted = fit_or_evaluate(&ids, &outcomes, Some(&flags), OutputMode::LogLoss, None)
        .unwrap()
        .as_log_loss()
        .unwrap();

    let guess = fit_or_evaluate(
        &ids,
        &outcomes,
        Some(&flags),
        OutputMode::LogLoss,
        Some(RatingParameters::default()),
    )
    .unwrap()
    .as_log_loss()
    .unwrap();

    assert!(fitted <= guess);
}

#[test]
fn differentials_mode_returns_one_pair_per_observation() {
    let (ids, outcomes, flags) = round_robin(5);
    let params = RatingParameters::new(vec![1_000_000], vec![24.0], 10.0).unwrap();

    let output = fit_or_evaluate(
        &ids,
        &outcomes,
        Some(&flags),
        OutputMode::Differentials,
        Some(params),
    )
    .unwrap();

    let diffs = output.as_differentials().unwrap();
    assert_eq!(diffs.len(), ids.len());
    // First event is between two fresh competitors.
    assert_eq!(diffs[0], (1000.0, 1000.0));
}

#[test]
fn unequal_input_lengths_are_rejected_before_processing() {
    let ids = pairs(&[("A", "B"), ("B", "C")]);

    let err = fit_or_evaluate(&ids, &[1.0], None, OutputMode::Ratings, None).unwrap_err();
    let rating_err = err.downcast::<RatingError>().unwrap();
    assert!(matches!(rating_err, RatingError::InputShape { .. }));
}

#[test]
fn mode_tags_parse_and_unknown_tags_fail() {
    assert_eq!("log_loss".parse::<OutputMode>().unwrap(), OutputMode::LogLoss);

    let err = "histogram".parse::<OutputMode>().unwrap_err();
    assert!(matches!(err, RatingError::InvalidMode { .. }));
}

#[test]
fn too_short_schedule_fails_at_the_crossing_observation() {
    // Breakpoints end at 20, so a 20th match for any competitor fails.
    let ids: Vec<(CompetitorId, CompetitorId)> = (0..20)
        .map(|i| ("veteran".to_string(), format!("rookie{i}")))
        .collect();
    let outcomes = vec![1.0; 20];

    let ok = fit_or_evaluate(
        &ids[..19],
        &outcomes[..19],
        None,
        OutputMode::Ratings,
        Some(RatingParameters::default()),
    );
    assert!(ok.is_ok());

    let err = fit_or_evaluate(
        &ids,
        &outcomes,
        None,
        OutputMode::Ratings,
        Some(RatingParameters::default()),
    )
    .unwrap_err();
    let rating_err = err.downcast::<RatingError>().unwrap();
    assert!(matches!(
        rating_err,
        RatingError::ScheduleExhausted { matches_played: 20 }
    ));
}
