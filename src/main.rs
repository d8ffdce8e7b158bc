use clap::Parser;
use delays::cli::{Cli, Commands};
use delays::commands;
use delays::error::Error;
use delays::term;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    term::init(cli.quiet, cli.color);
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command, &cli.config) {
        term::error(&e);
        if matches!(e, Error::UnknownStrategy(_)) {
            term::hint("Use --strategy exponential or fix the strategy in your profile.");
        }
        return e.exit_code().into();
    }

    std::process::ExitCode::SUCCESS
}

fn run(command: Commands, config_path: &Path) -> Result<(), Error> {
    match command {
        Commands::Plan(args) => commands::plan::execute(args, config_path),
        Commands::Init(args) => commands::init::execute(args, config_path),
        Commands::Completions(args) => {
            args.generate();
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "delays=warn",
        1 => "delays=info",
        2 => "delays=debug",
        _ => "delays=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
