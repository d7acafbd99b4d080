//! The M/H2/1/2 continuous-time Markov chain.
//!
//! [`build_model`] is the single entry point: it validates the parameters,
//! derives the phase rates, folds the transition table into the generator
//! matrix and extracts the adjacency pattern and the labelled transition
//! list. The resulting [`Model`] is immutable and is what every renderer
//! consumes.

pub mod generator;
pub mod parameters;
pub mod states;
pub mod transitions;

use serde::Serialize;
use std::collections::HashMap;

pub use generator::{AdjacencyMatrix, GeneratorMatrix, ROW_SUM_TOLERANCE};
pub use parameters::{derive_rates, DerivedRates, Parameters};
pub use states::{Phase, State, CAPACITY, STATE_COUNT};
pub use transitions::{Transition, TransitionCategory, TransitionRule, TRANSITION_RULES};

use crate::errors::{Error, Result};

/// Fully built chain: inputs, rates, matrices and labelled transitions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    pub parameters: Parameters,
    pub rates: DerivedRates,
    pub generator: GeneratorMatrix,
    pub adjacency: AdjacencyMatrix,
    pub transitions: Vec<Transition>,
    #[serde(skip)]
    categories: HashMap<(State, State), TransitionCategory>,
}

impl Model {
    /// Category of the edge `from -> to`, `None` if there is no transition
    pub fn category_of(&self, from: State, to: State) -> Option<TransitionCategory> {
        self.categories.get(&(from, to)).copied()
    }

    /// Outgoing transitions of `state`, in destination order
    pub fn transitions_from(&self, state: State) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == state)
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

/// Build the chain for the given parameters.
pub fn build_model(parameters: &Parameters) -> Result<Model> {
    let rates = derive_rates(parameters)?;
    let generator = GeneratorMatrix::build(&TRANSITION_RULES, &rates);
    let adjacency = AdjacencyMatrix::from_generator(&generator);

    let categories: HashMap<(State, State), TransitionCategory> = TRANSITION_RULES
        .iter()
        .map(|r| ((r.from, r.to), r.category))
        .collect();

    let transitions = generator
        .off_diagonal_entries()
        .filter(|&(_, _, rate)| rate > 0.0)
        .map(|(from, to, rate)| -> Result<Transition> {
            let category = categories.get(&(from, to)).copied().ok_or_else(|| {
                Error::Domain(format!("no transition rule for {from} -> {to}"))
            })?;
            Ok(Transition {
                from,
                to,
                rate,
                category,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Model {
        parameters: *parameters,
        rates,
        generator,
        adjacency,
        transitions,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_model() {
        let model = build_model(&Parameters::default()).unwrap();

        assert_eq!(model.transition_count(), 20);
        assert!(model.generator.is_balanced());
        assert_eq!(model.transitions_from(State::S5).count(), 2);
        assert_eq!(model.transitions_from(State::S0).count(), 2);
    }

    #[test]
    fn test_category_lookup_matches_transitions() {
        let model = build_model(&Parameters::default()).unwrap();
        for t in &model.transitions {
            assert_eq!(model.category_of(t.from, t.to), Some(t.category));
            assert!((t.category.rate(&model.rates) - t.rate).abs() < 1e-15);
        }
        assert_eq!(model.category_of(State::S6, State::S5), None);
    }

    #[test]
    fn test_invalid_parameters_fail_before_matrix() {
        let err = build_model(&Parameters::new(0.7, 10.0, 0.9, 0.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "V", .. }));
    }

    #[test]
    fn test_extreme_service_time_is_rejected_not_truncated() {
        for b in [1e308, 1e-310] {
            let err = build_model(&Parameters::new(0.7, b, 2.2, 1.0 / 7.0)).unwrap_err();
            assert!(matches!(err, Error::Domain(_)), "B = {b}: {err}");
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_model(&Parameters::default()).unwrap();
        let b = build_model(&Parameters::default()).unwrap();
        assert_eq!(a.generator, b.generator);
        assert_eq!(a.transitions, b.transitions);
    }
}
