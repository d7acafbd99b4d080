//! Generator (rate) matrix of the chain and its adjacency pattern.
//!
//! Reading: row is the source state, column the destination. Off-diagonal
//! cells hold transition rates; each diagonal cell is the negated sum of its
//! row so that every row sums to zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parameters::DerivedRates;
use super::states::{State, STATE_COUNT};
use super::transitions::TransitionRule;

/// Tolerance used when checking that rows balance
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// 7×7 CTMC generator matrix Q
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorMatrix {
    rates: [[f64; STATE_COUNT]; STATE_COUNT],
}

impl GeneratorMatrix {
    /// Fold the rule table into a rate matrix, then balance the diagonal
    pub fn build(rules: &[TransitionRule], rates: &DerivedRates) -> Self {
        let mut matrix = [[0.0; STATE_COUNT]; STATE_COUNT];

        for rule in rules {
            matrix[rule.from.index()][rule.to.index()] += rule.category.rate(rates);
        }

        for (i, row) in matrix.iter_mut().enumerate() {
            let outflow: f64 = row
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, rate)| rate)
                .sum();
            row[i] = -outflow;
        }

        let generator = Self { rates: matrix };
        debug!(
            transitions = generator.off_diagonal_count(),
            balanced = generator.is_balanced(),
            "built generator matrix"
        );
        generator
    }

    pub fn get(&self, from: State, to: State) -> f64 {
        self.rates[from.index()][to.index()]
    }

    pub fn row(&self, state: State) -> &[f64; STATE_COUNT] {
        &self.rates[state.index()]
    }

    pub fn rows(&self) -> &[[f64; STATE_COUNT]; STATE_COUNT] {
        &self.rates
    }

    pub fn row_sum(&self, state: State) -> f64 {
        self.row(state).iter().sum()
    }

    /// True if every row sums to zero within [`ROW_SUM_TOLERANCE`]
    pub fn is_balanced(&self) -> bool {
        State::ALL
            .iter()
            .all(|&s| self.row_sum(s).abs() <= ROW_SUM_TOLERANCE)
    }

    /// Number of non-zero off-diagonal entries
    pub fn off_diagonal_count(&self) -> usize {
        self.off_diagonal_entries().count()
    }

    /// Non-zero off-diagonal cells in row-major order
    pub fn off_diagonal_entries(&self) -> impl Iterator<Item = (State, State, f64)> + '_ {
        State::ALL.into_iter().flat_map(move |from| {
            State::ALL
                .into_iter()
                .filter(move |&to| to != from)
                .map(move |to| (from, to, self.get(from, to)))
                .filter(|&(_, _, rate)| rate != 0.0)
        })
    }
}

/// Sign pattern of the generator off the diagonal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    cells: [[u8; STATE_COUNT]; STATE_COUNT],
}

impl AdjacencyMatrix {
    pub fn from_generator(generator: &GeneratorMatrix) -> Self {
        let mut cells = [[0u8; STATE_COUNT]; STATE_COUNT];
        for (from, to, _) in generator.off_diagonal_entries() {
            cells[from.index()][to.index()] = 1;
        }
        Self { cells }
    }

    pub fn has_edge(&self, from: State, to: State) -> bool {
        self.cells[from.index()][to.index()] == 1
    }

    pub fn rows(&self) -> &[[u8; STATE_COUNT]; STATE_COUNT] {
        &self.cells
    }

    pub fn edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c == 1).count())
            .sum()
    }
}
