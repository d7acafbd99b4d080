// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod model;
pub mod observability;
pub mod output;

// Re-export commonly used types
pub use crate::errors::{Error, Result};

pub use crate::model::{
    build_model, derive_rates, AdjacencyMatrix, DerivedRates, GeneratorMatrix, Model, Parameters,
    Phase, State, Transition, TransitionCategory,
};

pub use crate::output::{export_graphviz, render, write_graphviz, DotConfig};
