use crate::cli::InitArgs;
use crate::config::validation;
use crate::config::{DEFAULT_ATTEMPTS, DEFAULT_EXPONENT, DEFAULT_TOTAL_DURATION, PlanInputs, Profile};
use crate::delay::StrategyKind;
use crate::domain::{HumanDuration, parse_duration};
use crate::error::{Error, Result};
use crate::term;
use std::path::Path;
use tracing::info;

pub fn execute(args: InitArgs, config_path: &Path) -> Result<()> {
    cliclack::intro("delays init")?;

    if config_path.exists() && !args.force {
        let overwrite = cliclack::confirm(format!(
            "{} already exists. Overwrite?",
            config_path.display()
        ))
        .initial_value(false)
        .interact()?;

        if !overwrite {
            cliclack::outro_cancel("Aborted.")?;
            return Ok(());
        }
    }

    let inputs = args.inputs.to_inputs();

    let strategy = match inputs.strategy {
        Some(s) => validation::validate_strategy(&s)?,
        None => {
            let mut select = cliclack::select("Delay strategy");
            for name in StrategyKind::NAMES {
                select = select.item(*name, *name, "");
            }
            validation::validate_strategy(select.interact()?)?
        }
    };

    let total_duration = match inputs.total_duration {
        Some(d) => {
            validation::validate_total_duration(d.into())?;
            d
        }
        None => {
            let default = HumanDuration::from(DEFAULT_TOTAL_DURATION).to_string();
            let value: String = cliclack::input("Total duration")
                .placeholder(&default)
                .default_input(&default)
                .validate(|input: &String| {
                    let total = parse_duration(input).map_err(|e| e.to_string())?;
                    validation::validate_total_duration(total).map_err(|e| e.to_string())
                })
                .interact()?;
            let total = parse_duration(&value)?;
            validation::validate_total_duration(total)?;
            HumanDuration::from(total)
        }
    };

    let attempts = match inputs.attempts {
        Some(n) => {
            validation::validate_attempts(n)?;
            n
        }
        None => {
            let default = DEFAULT_ATTEMPTS.to_string();
            let value: String = cliclack::input("Number of attempts")
                .placeholder(&default)
                .default_input(&default)
                .validate(|input: &String| {
                    let n: usize = input
                        .trim()
                        .parse()
                        .map_err(|_| format!("'{input}' is not a valid number"))?;
                    validation::validate_attempts(n).map_err(|e| e.to_string())
                })
                .interact()?;
            parse_prompted(&value)?
        }
    };

    let exponent = match inputs.exponent {
        Some(e) => {
            validation::validate_exponent(e)?;
            e
        }
        None => {
            let default = DEFAULT_EXPONENT.to_string();
            let value: String = cliclack::input("Shaping exponent")
                .placeholder(&default)
                .default_input(&default)
                .validate(|input: &String| {
                    let e: f64 = input
                        .trim()
                        .parse()
                        .map_err(|_| format!("'{input}' is not a valid number"))?;
                    validation::validate_exponent(e).map_err(|e| e.to_string())
                })
                .interact()?;
            parse_prompted(&value)?
        }
    };

    let profile = Profile {
        plan: PlanInputs {
            strategy: Some(strategy.to_string()),
            total_duration: Some(total_duration),
            attempts: Some(attempts),
            exponent: Some(exponent),
        },
    };
    profile.save(config_path)?;

    info!(path = %config_path.display(), "Profile written");
    cliclack::outro(format!("Created {}", config_path.display()))?;

    term::blank();
    term::hint("Next: delays plan");

    Ok(())
}

fn parse_prompted<T: std::str::FromStr>(value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::ConfigValidation(format!("'{value}' is not a valid number")))
}
