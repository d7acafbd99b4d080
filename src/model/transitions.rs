//! Declarative transition rules of the chain.
//!
//! Each rule names its source, destination and the event that fires it. The
//! rate is a function of the event alone, so the generator matrix is a fold
//! over [`TRANSITION_RULES`] and every renderer classifies edges from the
//! same table.
//!
//! Arrivals pick the phase of the new state with probabilities q / (1-q).
//! A completion in a state with a waiting job routes that job into phase 1
//! or phase 2 with the same probabilities. Full states (N = 3) have no
//! arrival rules: arriving jobs are lost without a state change.

use serde::{Deserialize, Serialize};

use super::parameters::DerivedRates;
use super::states::{Phase, State};

/// What kind of event a transition represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionCategory {
    /// A job arrives and the resulting state is in the given phase
    Arrival { phase: Phase },
    /// The job in `phase` finishes; `next` is the phase of the queued job
    /// entering service, or `None` when the system empties
    Completion { phase: Phase, next: Option<Phase> },
}

impl TransitionCategory {
    pub fn arrival(phase: Phase) -> Self {
        Self::Arrival { phase }
    }

    pub fn exit(phase: Phase) -> Self {
        Self::Completion { phase, next: None }
    }

    pub fn requeue(phase: Phase, next: Phase) -> Self {
        Self::Completion {
            phase,
            next: Some(next),
        }
    }

    pub fn is_arrival(self) -> bool {
        matches!(self, Self::Arrival { .. })
    }

    pub fn is_requeue(self) -> bool {
        matches!(self, Self::Completion { next: Some(_), .. })
    }

    /// Rate of this event under the given derived rates
    pub fn rate(self, rates: &DerivedRates) -> f64 {
        match self {
            Self::Arrival { phase } => rates.lambda_for(phase),
            Self::Completion { phase, next: None } => rates.mu_for(phase),
            Self::Completion {
                phase,
                next: Some(next),
            } => rates.mu_for(phase) * rates.routing_probability(next),
        }
    }

    /// Symbolic rate, e.g. `λ₁`, `μ₂`, `μ₁×(1-q)`
    pub fn symbol(self) -> String {
        match self {
            Self::Arrival { phase } => format!("λ{}", phase.subscript()),
            Self::Completion { phase, next: None } => format!("μ{}", phase.subscript()),
            Self::Completion {
                phase,
                next: Some(Phase::One),
            } => format!("μ{}×q", phase.subscript()),
            Self::Completion {
                phase,
                next: Some(Phase::Two),
            } => format!("μ{}×(1-q)", phase.subscript()),
        }
    }

    /// Symbol with its numeric value, e.g. `λ₁=0.1000`
    pub fn label(self, rates: &DerivedRates, decimals: usize) -> String {
        format!("{}={:.*}", self.symbol(), decimals, self.rate(rates))
    }

    /// Stable kebab-case name used in machine-readable output
    pub fn name(self) -> String {
        match self {
            Self::Arrival { phase } => format!("arrival-phase-{}", phase.number()),
            Self::Completion { phase, next: None } => {
                format!("phase-{}-completion-exit", phase.number())
            }
            Self::Completion {
                phase,
                next: Some(next),
            } => format!(
                "phase-{}-completion-requeue-phase-{}",
                phase.number(),
                next.number()
            ),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Arrival { phase: Phase::One } => "arrival, service starts in phase 1",
            Self::Arrival { phase: Phase::Two } => "arrival, service starts in phase 2",
            Self::Completion { next: None, .. } => "completion, system empties",
            Self::Completion {
                next: Some(Phase::One),
                ..
            } => "completion, next job starts phase 1",
            Self::Completion {
                next: Some(Phase::Two),
                ..
            } => "completion, next job starts phase 2",
        }
    }
}

/// One row of the declarative transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: State,
    pub to: State,
    pub category: TransitionCategory,
}

const fn rule(from: State, to: State, category: TransitionCategory) -> TransitionRule {
    TransitionRule { from, to, category }
}

const ARRIVE_1: TransitionCategory = TransitionCategory::Arrival { phase: Phase::One };
const ARRIVE_2: TransitionCategory = TransitionCategory::Arrival { phase: Phase::Two };
const EXIT_1: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::One,
    next: None,
};
const EXIT_2: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::Two,
    next: None,
};
const DONE_1_NEXT_1: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::One,
    next: Some(Phase::One),
};
const DONE_1_NEXT_2: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::One,
    next: Some(Phase::Two),
};
const DONE_2_NEXT_1: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::Two,
    next: Some(Phase::One),
};
const DONE_2_NEXT_2: TransitionCategory = TransitionCategory::Completion {
    phase: Phase::Two,
    next: Some(Phase::Two),
};

/// Every transition of the M/H2/1/2 chain, grouped by source state
pub const TRANSITION_RULES: [TransitionRule; 20] = [
    // empty system
    rule(State::S0, State::S1, ARRIVE_1),
    rule(State::S0, State::S2, ARRIVE_2),
    // one job, phase 1
    rule(State::S1, State::S0, EXIT_1),
    rule(State::S1, State::S3, ARRIVE_1),
    rule(State::S1, State::S4, ARRIVE_2),
    // one job, phase 2
    rule(State::S2, State::S0, EXIT_2),
    rule(State::S2, State::S3, ARRIVE_1),
    rule(State::S2, State::S4, ARRIVE_2),
    // two jobs, phase 1
    rule(State::S3, State::S1, DONE_1_NEXT_1),
    rule(State::S3, State::S2, DONE_1_NEXT_2),
    rule(State::S3, State::S5, ARRIVE_1),
    rule(State::S3, State::S6, ARRIVE_2),
    // two jobs, phase 2
    rule(State::S4, State::S1, DONE_2_NEXT_1),
    rule(State::S4, State::S2, DONE_2_NEXT_2),
    rule(State::S4, State::S5, ARRIVE_1),
    rule(State::S4, State::S6, ARRIVE_2),
    // queue full, arrivals lost
    rule(State::S5, State::S3, DONE_1_NEXT_1),
    rule(State::S5, State::S4, DONE_1_NEXT_2),
    rule(State::S6, State::S3, DONE_2_NEXT_1),
    rule(State::S6, State::S4, DONE_2_NEXT_2),
];

/// A realised edge of the chain with its numeric rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: State,
    pub to: State,
    pub rate: f64,
    pub category: TransitionCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rules_have_no_duplicates_or_self_loops() {
        let mut seen = HashSet::new();
        for r in &TRANSITION_RULES {
            assert_ne!(r.from, r.to, "self loop at {}", r.from);
            assert!(seen.insert((r.from, r.to)), "duplicate {}->{}", r.from, r.to);
        }
    }

    #[test]
    fn test_arrivals_add_one_job_and_completions_remove_one() {
        for r in &TRANSITION_RULES {
            let delta = r.to.jobs() as i8 - r.from.jobs() as i8;
            if r.category.is_arrival() {
                assert_eq!(delta, 1, "{}->{}", r.from, r.to);
            } else {
                assert_eq!(delta, -1, "{}->{}", r.from, r.to);
            }
        }
    }

    #[test]
    fn test_destination_phase_matches_category() {
        for r in &TRANSITION_RULES {
            match r.category {
                TransitionCategory::Arrival { phase } => assert_eq!(r.to.phase(), Some(phase)),
                TransitionCategory::Completion { phase, next } => {
                    assert_eq!(r.from.phase(), Some(phase));
                    assert_eq!(r.to.phase(), next);
                }
            }
        }
    }

    #[test]
    fn test_full_states_have_no_arrivals() {
        for r in TRANSITION_RULES.iter().filter(|r| r.from.is_full()) {
            assert!(!r.category.is_arrival());
        }
    }

    #[test]
    fn test_symbols_and_names() {
        assert_eq!(TransitionCategory::arrival(Phase::One).symbol(), "λ₁");
        assert_eq!(TransitionCategory::exit(Phase::Two).symbol(), "μ₂");
        assert_eq!(
            TransitionCategory::requeue(Phase::One, Phase::Two).symbol(),
            "μ₁×(1-q)"
        );
        assert_eq!(
            TransitionCategory::requeue(Phase::Two, Phase::One).name(),
            "phase-2-completion-requeue-phase-1"
        );
        assert_eq!(
            TransitionCategory::exit(Phase::One).name(),
            "phase-1-completion-exit"
        );
    }
}
