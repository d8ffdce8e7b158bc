mod args;

pub use args::{
    Cli, ColorChoice, Commands, CompletionsArgs, DEFAULT_CONFIG_FILE, InitArgs, OutputFormat,
    PlanArgs, PlanInputArgs,
};
