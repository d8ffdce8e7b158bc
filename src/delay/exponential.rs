use super::{DelayPlan, DelayPlanConfig, DelayStrategy};
use std::time::Duration;

/// Spreads the budget along the curve `(i / (n - 1)) ^ exponent`.
///
/// Every entry except the single-attempt case is rounded to whole seconds on
/// its own, so the plan total can drift a little from the requested budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exponential;

impl DelayStrategy for Exponential {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn compute_plan(&self, config: &DelayPlanConfig) -> DelayPlan {
        exponential_delays(config.total_duration, config.attempts, config.exponent).into()
    }
}

/// Computes the raw exponential plan.
///
/// A negative (or NaN) exponent, a zero budget or zero attempts yield an
/// empty plan rather than an error.
pub fn exponential_delays(total: Duration, attempts: usize, exponent: f64) -> Vec<Duration> {
    if !(exponent >= 0.0) || total.is_zero() || attempts == 0 {
        return Vec::new();
    }

    if attempts == 1 {
        return vec![total];
    }

    let last = (attempts - 1) as f64;
    // powf(0.0, 0.0) == 1.0, so a zero exponent gives a flat plan
    let weights: Vec<f64> = (0..attempts)
        .map(|i| (i as f64 / last).powf(exponent))
        .collect();
    let weight_sum: f64 = weights.iter().sum();
    let total_secs = total.as_secs_f64();

    weights
        .iter()
        .map(|weight| {
            let secs = weight / weight_sum * total_secs;
            Duration::from_secs(secs.round() as u64)
        })
        .collect()
}
