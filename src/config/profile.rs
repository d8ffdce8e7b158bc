use super::validation;
use crate::delay::{Delay, DelayPlanConfig, StrategyKind};
use crate::domain::HumanDuration;
use crate::error::{Error, Result};
use crate::infra::{read_to_string_if_exists, write_atomic_file};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Wait budget used when neither a flag nor the profile sets one.
pub const DEFAULT_TOTAL_DURATION: Duration = Duration::from_secs(120);
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Square root of the golden ratio.
pub const DEFAULT_EXPONENT: f64 = 1.272_019_649_514_069;

/// Contents of a `delays.toml` profile.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub plan: PlanInputs,
}

/// Plan inputs that may each be left unset.
///
/// Used both for the profile's `[plan]` table and for command-line overrides.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<HumanDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
}

impl PlanInputs {
    /// Fills unset fields from `fallback`.
    pub fn or(self, fallback: &PlanInputs) -> PlanInputs {
        PlanInputs {
            strategy: self.strategy.or_else(|| fallback.strategy.clone()),
            total_duration: self.total_duration.or(fallback.total_duration),
            attempts: self.attempts.or(fallback.attempts),
            exponent: self.exponent.or(fallback.exponent),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(strategy) = &self.strategy {
            validation::validate_strategy(strategy)?;
        }
        if let Some(total_duration) = self.total_duration {
            validation::validate_total_duration(total_duration.into())?;
        }
        if let Some(attempts) = self.attempts {
            validation::validate_attempts(attempts)?;
        }
        if let Some(exponent) = self.exponent {
            validation::validate_exponent(exponent)?;
        }
        Ok(())
    }
}

impl Profile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path_str.clone(),
            source: e,
        })?;

        Self::parse(&content, &path_str)
    }

    /// Loads the profile, or returns `None` when the file does not exist.
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = read_to_string_if_exists(path).map_err(|e| Error::FileRead {
            path: path_str.clone(),
            source: e,
        })?;

        match content {
            Some(content) => Self::parse(&content, &path_str).map(Some),
            None => {
                debug!(path = %path_str, "No profile found, using defaults");
                Ok(None)
            }
        }
    }

    fn parse(content: &str, path_str: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(content).map_err(|e| Error::TomlParse {
            path: path_str.to_string(),
            source: e,
        })?;

        profile.plan.validate()?;
        debug!(path = %path_str, "Loaded profile");
        Ok(profile)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| Error::TomlSerialize {
            path: path.display().to_string(),
            source: e,
        })?;

        write_atomic_file(path, &content).map_err(|e| Error::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

/// Fully resolved plan inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSettings {
    pub strategy: StrategyKind,
    pub total_duration: Duration,
    pub attempts: usize,
    pub exponent: f64,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            total_duration: DEFAULT_TOTAL_DURATION,
            attempts: DEFAULT_ATTEMPTS,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl PlanSettings {
    /// Resolves inputs with precedence: overrides, then profile, then defaults.
    ///
    /// An unrecognized strategy name is an error; nothing is planned for it.
    pub fn resolve(overrides: PlanInputs, profile: Option<&Profile>) -> Result<Self> {
        let inputs = match profile {
            Some(profile) => overrides.or(&profile.plan),
            None => overrides,
        };
        inputs.validate()?;

        let defaults = Self::default();
        let strategy = match inputs.strategy.as_deref() {
            Some(name) => validation::validate_strategy(name)?,
            None => defaults.strategy,
        };

        Ok(Self {
            strategy,
            total_duration: inputs
                .total_duration
                .map(Duration::from)
                .unwrap_or(defaults.total_duration),
            attempts: inputs.attempts.unwrap_or(defaults.attempts),
            exponent: inputs.exponent.unwrap_or(defaults.exponent),
        })
    }

    pub fn plan_config(&self) -> DelayPlanConfig {
        DelayPlanConfig::new(self.total_duration, self.attempts, self.exponent)
    }

    pub fn build(&self) -> Delay {
        self.strategy.build(self.plan_config())
    }
}
