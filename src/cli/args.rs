use crate::config::PlanInputs;
use crate::config::validation::{self, MAX_ATTEMPTS, MAX_TOTAL_DURATION};
use crate::domain::HumanDuration;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Default profile file name.
pub const DEFAULT_CONFIG_FILE: &str = "delays.toml";

fn parse_total_duration(s: &str) -> Result<HumanDuration, String> {
    let value: HumanDuration = s
        .parse()
        .map_err(|e: crate::domain::DurationParseError| e.to_string())?;

    if value.0 > MAX_TOTAL_DURATION {
        return Err(format!(
            "total duration must be at most {}",
            HumanDuration::from(MAX_TOTAL_DURATION)
        ));
    }

    Ok(value)
}

fn parse_attempts(s: &str) -> Result<usize, String> {
    let value: usize = parse_number(s)?;

    if value > MAX_ATTEMPTS {
        return Err(format!("attempts must be at most {MAX_ATTEMPTS}"));
    }

    Ok(value)
}

fn parse_exponent(s: &str) -> Result<f64, String> {
    let value: f64 = parse_number(s)?;
    validation::validate_exponent(value)
        .map_err(|_| "exponent must be a finite number".to_string())?;
    Ok(value)
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}

#[derive(Parser, Debug)]
#[command(name = "delays", version, about = "Retry delay planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the profile file holding default plan inputs
    #[arg(long, global = true, env = "DELAYS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a delay plan and print it or export it as an HTML chart
    Plan(PlanArgs),

    /// Write a delays.toml profile with default plan inputs
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generates and prints shell completions to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "delays", &mut std::io::stdout());
    }
}

/// Plan inputs shared by commands; unset values fall back to the profile.
#[derive(Args, Debug, Default, Clone)]
pub struct PlanInputArgs {
    /// Delay strategy (available: exponential)
    #[arg(short, long, env = "DELAYS_STRATEGY")]
    pub strategy: Option<String>,

    /// Total wait budget spread across all attempts (e.g. 30s, 2m, 1h15m)
    #[arg(short = 'd', long, env = "DELAYS_TOTAL_DURATION", value_parser = parse_total_duration)]
    pub total_duration: Option<HumanDuration>,

    /// Number of attempts (0-10000)
    #[arg(short = 'n', long, env = "DELAYS_ATTEMPTS", value_parser = parse_attempts)]
    pub attempts: Option<usize>,

    /// Shaping exponent; higher values save more time for later attempts
    #[arg(
        short,
        long,
        env = "DELAYS_EXPONENT",
        allow_negative_numbers = true,
        value_parser = parse_exponent
    )]
    pub exponent: Option<f64>,
}

impl PlanInputArgs {
    pub fn to_inputs(&self) -> PlanInputs {
        PlanInputs {
            strategy: self.strategy.clone(),
            total_duration: self.total_duration,
            attempts: self.attempts,
            exponent: self.exponent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Ruled table with elapsed time per attempt
    #[default]
    Table,
    /// "Delays:" header followed by one line per attempt
    Plain,
    /// JSON array of attempts
    Json,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub inputs: PlanInputArgs,

    /// Write an HTML chart to this file instead of printing the plan
    #[arg(short, long, env = "DELAYS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub inputs: PlanInputArgs,

    /// Overwrite existing file without confirmation
    #[arg(long)]
    pub force: bool,
}
