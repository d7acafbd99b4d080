//! Property-based tests for the generator matrix
//!
//! These tests verify invariants that should hold for all valid inputs:
//! - Every row of Q sums to zero
//! - Off-diagonal rates are non-negative, diagonal rates non-positive
//! - Full states never grow the queue
//! - Split arrival rates add back up to λ
//! - The adjacency matrix is the off-diagonal sign pattern of Q
//! - Building and exporting are deterministic

use mh2graph::model::{ROW_SUM_TOLERANCE, TRANSITION_RULES};
use mh2graph::{build_model, export_graphviz, DotConfig, Error, Parameters, State};
use proptest::prelude::*;

/// Valid parameters: V > 1, q in (0,1) and a positive phase 2 mean time.
///
/// V is drawn through `t = q/(2(1-q))·(V²-1)` so that `t < 1` holds by
/// construction instead of by rejection.
fn valid_parameters() -> impl Strategy<Value = Parameters> {
    (0.01f64..5.0, 0.1f64..100.0, 0.01f64..0.95, 0.01f64..0.99).prop_map(|(lambda, b, t, q)| {
        let v = (1.0 + t * 2.0 * (1.0 - q) / q).sqrt();
        Parameters::new(lambda, b, v, q)
    })
}

proptest! {
    #[test]
    fn prop_rows_sum_to_zero(params in valid_parameters()) {
        let model = build_model(&params).unwrap();
        for state in State::ALL {
            let sum = model.generator.row_sum(state);
            prop_assert!(sum.abs() <= ROW_SUM_TOLERANCE, "row {} sums to {}", state, sum);
        }
    }

    #[test]
    fn prop_sign_pattern(params in valid_parameters()) {
        let model = build_model(&params).unwrap();
        for from in State::ALL {
            for to in State::ALL {
                let rate = model.generator.get(from, to);
                if from == to {
                    prop_assert!(rate <= 0.0);
                } else {
                    prop_assert!(rate >= 0.0);
                }
            }
        }
    }

    #[test]
    fn prop_full_states_never_grow(params in valid_parameters()) {
        let model = build_model(&params).unwrap();
        for from in [State::S5, State::S6] {
            for to in State::ALL {
                if to.jobs() >= from.jobs() && to != from {
                    prop_assert_eq!(model.generator.get(from, to), 0.0);
                }
            }
        }
    }

    #[test]
    fn prop_arrival_split_preserves_lambda(params in valid_parameters()) {
        let model = build_model(&params).unwrap();
        let total = model.rates.lambda1 + model.rates.lambda2;
        prop_assert!((total - params.lambda).abs() <= 1e-12 * params.lambda.max(1.0));
        prop_assert!(model.rates.mu1 > 0.0);
        prop_assert!(model.rates.mu2 > 0.0);
    }

    #[test]
    fn prop_adjacency_is_sign_pattern(params in valid_parameters()) {
        let model = build_model(&params).unwrap();
        for from in State::ALL {
            for to in State::ALL {
                let expected = from != to && model.generator.get(from, to) != 0.0;
                prop_assert_eq!(model.adjacency.has_edge(from, to), expected);
            }
        }
        prop_assert_eq!(model.adjacency.edge_count(), TRANSITION_RULES.len());
    }

    #[test]
    fn prop_build_is_idempotent(params in valid_parameters()) {
        let first = build_model(&params).unwrap();
        let second = build_model(&params).unwrap();
        prop_assert_eq!(&first.generator, &second.generator);
        prop_assert_eq!(
            export_graphviz(&first, &DotConfig::default()).unwrap(),
            export_graphviz(&second, &DotConfig::default()).unwrap()
        );
    }

    #[test]
    fn prop_cv_at_or_below_one_is_rejected(v in 0.0f64..=1.0, q in 0.01f64..0.99) {
        let err = build_model(&Parameters::new(0.7, 10.0, v, q)).unwrap_err();
        let is_invalid_parameter = matches!(err, Error::InvalidParameter { .. });
        prop_assert!(is_invalid_parameter);
    }
}

#[test]
fn test_reference_scenario() {
    let params = Parameters::new(0.7, 10.0, 2.2, 1.0 / 7.0);
    let model = build_model(&params).unwrap();
    let q = &model.generator;

    assert!((model.rates.mu1 - 0.02280).abs() < 1e-3);
    assert!((model.rates.mu2 - 0.23017).abs() < 1e-3);
    assert!((model.rates.lambda1 - 0.1).abs() < 1e-12);
    assert!((model.rates.lambda2 - 0.6).abs() < 1e-12);

    assert!((q.get(State::S0, State::S1) - 0.1).abs() < 1e-12);
    assert!((q.get(State::S0, State::S2) - 0.6).abs() < 1e-12);
    assert!((q.get(State::S1, State::S0) - 0.0228).abs() < 1e-3);

    assert_eq!(q.off_diagonal_count(), 20);
    let from_s5: Vec<State> = model.transitions_from(State::S5).map(|t| t.to).collect();
    assert_eq!(from_s5, vec![State::S3, State::S4]);
}

#[test]
fn test_domain_error_is_reported() {
    let err = build_model(&Parameters::new(0.7, 10.0, 3.0, 0.5)).unwrap_err();
    assert!(matches!(err, Error::Domain(_)));
}
