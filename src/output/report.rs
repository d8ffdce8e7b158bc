use crate::delay::Delay;
use crate::domain::HumanDuration;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const RULE: &str = "================";

/// One attempt of a plan in report form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    /// 1-based attempt number.
    pub attempt: usize,
    pub wait_seconds: f64,
    /// Sum of waits up to and including this attempt.
    pub elapsed_seconds: f64,
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn plan_rows(delay: &Delay) -> Vec<PlanRow> {
    delay
        .plan()
        .iter()
        .zip(delay.plan().elapsed())
        .enumerate()
        .map(|(i, (wait, elapsed))| PlanRow {
            attempt: i + 1,
            wait_seconds: round2(wait.as_secs_f64()),
            elapsed_seconds: round2(elapsed.as_secs_f64()),
        })
        .collect()
}

/// Renders the plan as a ruled table with running elapsed time.
pub fn render_table(delay: &Delay) -> Vec<String> {
    let mut lines = Vec::with_capacity(delay.plan().len() + 3);
    lines.push("Plan of Delays:".to_string());
    lines.push(RULE.to_string());

    for (i, (wait, elapsed)) in delay
        .plan()
        .iter()
        .zip(delay.plan().elapsed())
        .enumerate()
    {
        lines.push(format!(
            "Attempt {:2}: wait {}. Elapsed {}.",
            i + 1,
            HumanDuration(*wait),
            HumanDuration(elapsed)
        ));
    }

    lines.push(RULE.to_string());
    lines
}

/// Summarizes how far the plan total is from the requested budget.
pub fn drift_summary(delay: &Delay) -> String {
    let planned = delay.plan().total();
    let requested = delay.config().total_duration;

    let drift = if planned >= requested {
        format!("+{}", HumanDuration(planned - requested))
    } else {
        format!("-{}", HumanDuration(requested - planned))
    };

    format!(
        "Total {} over {} attempts (requested {}, drift {})",
        HumanDuration(planned),
        delay.plan().len(),
        HumanDuration(requested),
        drift
    )
}

pub fn render_json(delay: &Delay) -> Result<String> {
    serde_json::to_string_pretty(&plan_rows(delay)).map_err(Error::JsonSerialize)
}

/// Explains why a plan came out empty.
pub fn empty_plan_reason(delay: &Delay) -> &'static str {
    let config = delay.config();
    if !(config.exponent >= 0.0) {
        "exponent is negative"
    } else if config.total_duration == Duration::ZERO {
        "total duration is zero"
    } else if config.attempts == 0 {
        "attempts is zero"
    } else {
        "strategy produced no delays"
    }
}
