//! Retry-wait planning.
//!
//! A [`DelayStrategy`] turns a [`DelayPlanConfig`] into a [`DelayPlan`]; the
//! [`Delay`] facade computes that plan once and answers read-only queries
//! against it.

mod exponential;
mod plan;

pub use exponential::{Exponential, exponential_delays};
pub use plan::{DelayPlan, DelayPlanConfig};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// A rule for distributing a wait budget across a fixed number of attempts.
///
/// Implementations must be deterministic: the same config always yields the
/// same plan.
#[cfg_attr(test, automock)]
pub trait DelayStrategy: Send + Sync {
    /// Name used on the command line and in reports.
    fn name(&self) -> &'static str;

    /// Lays out the full plan for `config`.
    fn compute_plan(&self, config: &DelayPlanConfig) -> DelayPlan;
}

/// Precomputed delay plan behind a strategy-agnostic query surface.
#[derive(Debug, Clone)]
pub struct Delay {
    strategy: &'static str,
    config: DelayPlanConfig,
    plan: DelayPlan,
}

impl Delay {
    /// Computes the plan eagerly; later queries never recompute it.
    pub fn new<S>(strategy: &S, config: DelayPlanConfig) -> Self
    where
        S: DelayStrategy + ?Sized,
    {
        let plan = strategy.compute_plan(&config);

        debug!(
            strategy = strategy.name(),
            total = ?config.total_duration,
            attempts = config.attempts,
            exponent = config.exponent,
            planned = plan.len(),
            "Computed delay plan"
        );

        Self {
            strategy: strategy.name(),
            config,
            plan,
        }
    }

    /// Shorthand for an [`Exponential`] plan.
    pub fn exponential(total_duration: Duration, attempts: usize, exponent: f64) -> Self {
        Self::new(
            &Exponential,
            DelayPlanConfig::new(total_duration, attempts, exponent),
        )
    }

    /// Wait before the given 0-based attempt; zero when out of range.
    pub fn at(&self, attempt: usize) -> Duration {
        self.plan.at(attempt)
    }

    pub fn plan(&self) -> &DelayPlan {
        &self.plan
    }

    pub fn describe(&self) -> String {
        self.plan.describe()
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    pub fn config(&self) -> &DelayPlanConfig {
        &self.config
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.plan, f)
    }
}

/// Strategies selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Exponential,
}

impl StrategyKind {
    pub const NAMES: &'static [&'static str] = &["exponential"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Exponential => "exponential",
        }
    }

    pub fn strategy(&self) -> Box<dyn DelayStrategy> {
        match self {
            StrategyKind::Exponential => Box::new(Exponential),
        }
    }

    /// Builds the plan for this strategy.
    pub fn build(&self, config: DelayPlanConfig) -> Delay {
        Delay::new(&*self.strategy(), config)
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exponential" => Ok(StrategyKind::Exponential),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
