use crate::delay::StrategyKind;
use crate::domain::HumanDuration;
use crate::error::{Error, Result};
use std::time::Duration;

/// Upper bound on attempts accepted from the command line or a profile.
pub const MAX_ATTEMPTS: usize = 10_000;

/// Upper bound on the total wait budget: `i64::MAX` nanoseconds (about
/// 2562047h), the range of a signed 64-bit nanosecond clock.
pub const MAX_TOTAL_DURATION: Duration = Duration::from_nanos(i64::MAX as u64);

/// Validates that a strategy name is one the planner knows.
///
/// Names match exactly.
/// Valid examples: "exponential"
/// Invalid examples: "Exponential", "linear", ""
pub fn validate_strategy(name: &str) -> Result<StrategyKind> {
    name.parse()
}

/// Validates that an exponent is a finite real number.
///
/// Negative exponents are accepted here; they produce an empty plan.
pub fn validate_exponent(exponent: f64) -> Result<()> {
    if !exponent.is_finite() {
        return Err(Error::ConfigValidation(format!(
            "exponent must be a finite number, got {exponent}"
        )));
    }
    Ok(())
}

/// Validates that a total wait budget fits within [`MAX_TOTAL_DURATION`].
pub fn validate_total_duration(total: Duration) -> Result<()> {
    if total > MAX_TOTAL_DURATION {
        return Err(Error::ConfigValidation(format!(
            "total duration must be at most {}, got {}",
            HumanDuration::from(MAX_TOTAL_DURATION),
            HumanDuration::from(total)
        )));
    }
    Ok(())
}

/// Validates the number of attempts.
///
/// Zero is accepted and produces an empty plan.
pub fn validate_attempts(attempts: usize) -> Result<()> {
    if attempts > MAX_ATTEMPTS {
        return Err(Error::ConfigValidation(format!(
            "attempts must be at most {MAX_ATTEMPTS}, got {attempts}"
        )));
    }
    Ok(())
}
