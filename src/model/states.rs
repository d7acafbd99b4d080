//! The fixed state space of the M/H2/1/2 chain.
//!
//! A state is the pair (N, φ): the number of jobs in the system (including
//! the one in service) and the service phase of the job being served. With
//! one server and two waiting places N never exceeds 3.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of states in the chain
pub const STATE_COUNT: usize = 7;

/// Maximum number of jobs the system can hold (1 in service + 2 queued)
pub const CAPACITY: u8 = 3;

/// Service phase of the job currently being served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    One,
    Two,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
        }
    }

    /// Subscript digit used in rate labels (λ₁, μ₂)
    pub fn subscript(self) -> &'static str {
        match self {
            Phase::One => "₁",
            Phase::Two => "₂",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "φ{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
}

impl State {
    /// All states in matrix index order
    pub const ALL: [State; STATE_COUNT] = [
        State::S0,
        State::S1,
        State::S2,
        State::S3,
        State::S4,
        State::S5,
        State::S6,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        match self {
            State::S0 => "S0",
            State::S1 => "S1",
            State::S2 => "S2",
            State::S3 => "S3",
            State::S4 => "S4",
            State::S5 => "S5",
            State::S6 => "S6",
        }
    }

    /// Number of jobs in the system, N
    pub fn jobs(self) -> u8 {
        match self {
            State::S0 => 0,
            State::S1 | State::S2 => 1,
            State::S3 | State::S4 => 2,
            State::S5 | State::S6 => 3,
        }
    }

    /// Phase of the job in service, `None` when the system is empty
    pub fn phase(self) -> Option<Phase> {
        match self {
            State::S0 => None,
            State::S1 | State::S3 | State::S5 => Some(Phase::One),
            State::S2 | State::S4 | State::S6 => Some(Phase::Two),
        }
    }

    /// Number of jobs waiting in the queue
    pub fn queued(self) -> u8 {
        self.jobs().saturating_sub(1)
    }

    /// Arrivals are lost in this state
    pub fn is_full(self) -> bool {
        self.jobs() == CAPACITY
    }

    /// The (N, φ) pair, e.g. `(2,1)` or `(0,-)`
    pub fn notation(self) -> String {
        match self.phase() {
            Some(phase) => format!("({},{})", self.jobs(), phase.number()),
            None => format!("({},-)", self.jobs()),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            State::S0 => "System empty",
            State::S1 => "1 job in service, phase 1",
            State::S2 => "1 job in service, phase 2",
            State::S3 => "2 jobs (1 queued), phase 1",
            State::S4 => "2 jobs (1 queued), phase 2",
            State::S5 => "3 jobs (queue full), phase 1",
            State::S6 => "3 jobs (queue full), phase 2",
        }
    }

    /// Short tag shown under the notation in graph nodes
    pub fn short_tag(self) -> String {
        match (self.phase(), self.is_full()) {
            (None, _) => "empty".to_string(),
            (Some(_), true) => "FULL".to_string(),
            (Some(phase), false) if self.queued() == 0 => format!("phase {}", phase.number()),
            (Some(phase), false) => format!("q={},{}", self.queued(), phase),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
