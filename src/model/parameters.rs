//! Input parameters and the closed-form phase rate derivation.
//!
//! The hyperexponential service time is a mixture of two exponential phases.
//! Given the mean service time `B`, coefficient of variation `V > 1` and the
//! probability `q` of entering phase 1, the phase mean times are
//!
//! ```text
//! b1' = (1 + sqrt((1-q)/(2q) * (V²-1))) * B
//! b2' = (1 - sqrt(q/(2(1-q)) * (V²-1))) * B
//! ```
//!
//! and the completion rates are their reciprocals. Arrivals are split the
//! same way: `λ1 = qλ` start phase 1, `λ2 = (1-q)λ` start phase 2.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::states::Phase;
use crate::errors::{Error, Result};

/// Raw model inputs: arrival rate, mean service time, coefficient of
/// variation and phase-1 probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Arrival rate λ
    pub lambda: f64,
    /// Mean service time B
    pub mean_service_time: f64,
    /// Coefficient of variation V of the service time
    pub coefficient_of_variation: f64,
    /// Probability q that a job is served in phase 1
    pub phase1_probability: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            lambda: 0.7,
            mean_service_time: 10.0,
            coefficient_of_variation: 2.2,
            phase1_probability: 1.0 / 7.0,
        }
    }
}

impl Parameters {
    pub fn new(lambda: f64, mean_service_time: f64, cv: f64, q: f64) -> Self {
        Self {
            lambda,
            mean_service_time,
            coefficient_of_variation: cv,
            phase1_probability: q,
        }
    }

    /// Check every range constraint, failing on the first violation.
    pub fn validate(&self) -> Result<()> {
        check_finite("λ", self.lambda)?;
        check_finite("B", self.mean_service_time)?;
        check_finite("V", self.coefficient_of_variation)?;
        check_finite("q", self.phase1_probability)?;

        if self.lambda <= 0.0 {
            return Err(Error::invalid_parameter(
                "λ",
                self.lambda,
                "arrival rate must be positive",
            ));
        }
        if self.mean_service_time <= 0.0 {
            return Err(Error::invalid_parameter(
                "B",
                self.mean_service_time,
                "mean service time must be positive",
            ));
        }
        if self.coefficient_of_variation <= 1.0 {
            return Err(Error::invalid_parameter(
                "V",
                self.coefficient_of_variation,
                "hyperexponential service requires a coefficient of variation greater than 1",
            ));
        }
        if self.phase1_probability <= 0.0 || self.phase1_probability >= 1.0 {
            return Err(Error::invalid_parameter(
                "q",
                self.phase1_probability,
                "phase-1 probability must lie strictly between 0 and 1",
            ));
        }
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, value, "value must be finite"))
    }
}

/// Rates derived from [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRates {
    /// Phase 1 completion rate μ1
    pub mu1: f64,
    /// Phase 2 completion rate μ2
    pub mu2: f64,
    /// Arrival rate of jobs that start in phase 1
    pub lambda1: f64,
    /// Arrival rate of jobs that start in phase 2
    pub lambda2: f64,
    /// Phase-1 probability, carried along for the requeue split
    pub q: f64,
    /// Mean time of phase 1, b1'
    pub phase1_mean: f64,
    /// Mean time of phase 2, b2'
    pub phase2_mean: f64,
}

impl DerivedRates {
    pub fn mu_for(&self, phase: Phase) -> f64 {
        match phase {
            Phase::One => self.mu1,
            Phase::Two => self.mu2,
        }
    }

    pub fn lambda_for(&self, phase: Phase) -> f64 {
        match phase {
            Phase::One => self.lambda1,
            Phase::Two => self.lambda2,
        }
    }

    /// Probability that the next job from the queue starts in `phase`
    pub fn routing_probability(&self, phase: Phase) -> f64 {
        match phase {
            Phase::One => self.q,
            Phase::Two => 1.0 - self.q,
        }
    }
}

/// Derive μ1, μ2, λ1, λ2 from validated parameters.
pub fn derive_rates(params: &Parameters) -> Result<DerivedRates> {
    params.validate()?;

    let q = params.phase1_probability;
    let b = params.mean_service_time;
    let excess = params.coefficient_of_variation.powi(2) - 1.0;

    let term1 = ((1.0 - q) / (2.0 * q) * excess).sqrt();
    let phase1_mean = (1.0 + term1) * b;

    let term2 = (q / (2.0 * (1.0 - q)) * excess).sqrt();
    if term2 >= 1.0 {
        return Err(Error::Domain(format!(
            "phase 2 mean time b2' = (1 - {term2:.6}) * {b} is not positive; \
             reduce V or q so that q/(2(1-q))·(V²-1) < 1"
        )));
    }
    let phase2_mean = (1.0 - term2) * b;

    let rates = DerivedRates {
        mu1: 1.0 / phase1_mean,
        mu2: 1.0 / phase2_mean,
        lambda1: q * params.lambda,
        lambda2: (1.0 - q) * params.lambda,
        q,
        phase1_mean,
        phase2_mean,
    };
    check_rates(&rates)?;

    debug!(
        mu1 = rates.mu1,
        mu2 = rates.mu2,
        lambda1 = rates.lambda1,
        lambda2 = rates.lambda2,
        "derived phase rates"
    );

    Ok(rates)
}

/// Every derived time and rate must be a positive finite number, otherwise
/// the chain loses edges or its rows stop summing to zero.
fn check_rates(rates: &DerivedRates) -> Result<()> {
    let values = [
        ("b1'", rates.phase1_mean),
        ("b2'", rates.phase2_mean),
        ("μ1", rates.mu1),
        ("μ2", rates.mu2),
        ("λ1", rates.lambda1),
        ("λ2", rates.lambda2),
    ];
    match values
        .iter()
        .find(|(_, value)| !value.is_finite() || *value <= 0.0)
    {
        Some((name, value)) => Err(Error::Domain(format!(
            "derived {name} = {value} is not a positive finite number; \
             the inputs are outside the representable range"
        ))),
        None => Ok(()),
    }
}
