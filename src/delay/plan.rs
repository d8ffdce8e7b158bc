use crate::domain::HumanDuration;
use std::fmt;
use std::time::Duration;

/// Inputs a strategy needs to lay out a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayPlanConfig {
    /// Wait budget spread across all attempts.
    pub total_duration: Duration,
    pub attempts: usize,
    /// Shaping exponent; higher values push more of the budget to later attempts.
    pub exponent: f64,
}

impl DelayPlanConfig {
    pub fn new(total_duration: Duration, attempts: usize, exponent: f64) -> Self {
        Self {
            total_duration,
            attempts,
            exponent,
        }
    }
}

/// An ordered, immutable sequence of per-attempt waits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayPlan {
    delays: Vec<Duration>,
}

impl DelayPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wait before the given 0-based attempt, or zero when out of range.
    pub fn at(&self, attempt: usize) -> Duration {
        self.delays.get(attempt).copied().unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[Duration] {
        &self.delays
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Duration> {
        self.delays.iter()
    }

    /// Sum of all planned waits, saturating at `Duration::MAX`. May differ
    /// from the requested budget by a few seconds because entries are rounded
    /// independently.
    pub fn total(&self) -> Duration {
        self.delays
            .iter()
            .fold(Duration::ZERO, |total, delay| total.saturating_add(*delay))
    }

    /// Running total of waits, one entry per attempt. Saturates like [`total`].
    ///
    /// [`total`]: DelayPlan::total
    pub fn elapsed(&self) -> Vec<Duration> {
        self.delays
            .iter()
            .scan(Duration::ZERO, |elapsed, delay| {
                *elapsed = elapsed.saturating_add(*delay);
                Some(*elapsed)
            })
            .collect()
    }

    /// Renders `Delays:` followed by one `Attempt <n>: <wait>` line per attempt.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl From<Vec<Duration>> for DelayPlan {
    fn from(delays: Vec<Duration>) -> Self {
        Self { delays }
    }
}

impl fmt::Display for DelayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Delays:")?;
        for (i, delay) in self.delays.iter().enumerate() {
            writeln!(f, "Attempt {}: {}", i + 1, HumanDuration(*delay))?;
        }
        Ok(())
    }
}
