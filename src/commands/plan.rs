use crate::cli::{OutputFormat, PlanArgs};
use crate::config::{PlanSettings, Profile};
use crate::delay::Delay;
use crate::domain::HumanDuration;
use crate::error::Result;
use crate::infra::write_output;
use crate::output::{drift_summary, empty_plan_reason, render_chart, render_json, render_table};
use crate::term;
use std::path::Path;
use tracing::info;

pub fn execute(args: PlanArgs, config_path: &Path) -> Result<()> {
    let profile = Profile::load_if_exists(config_path)?;
    let settings = PlanSettings::resolve(args.inputs.to_inputs(), profile.as_ref())?;

    info!(
        strategy = %settings.strategy,
        total = %HumanDuration(settings.total_duration),
        attempts = settings.attempts,
        exponent = settings.exponent,
        profile = profile.is_some(),
        "Planning delays"
    );

    let delay = settings.build();

    if delay.plan().is_empty() {
        term::warning(format!("Empty plan: {}", empty_plan_reason(&delay)));
    }

    match args.output {
        Some(path) => export_chart(&delay, &path),
        None => print_plan(&delay, args.format),
    }
}

fn export_chart(delay: &Delay, path: &Path) -> Result<()> {
    let spinner = term::spinner("Rendering chart...");

    let result = render_chart(delay).and_then(|html| write_output(path, &html));
    spinner.finish_and_clear();
    result?;

    info!(path = %path.display(), attempts = delay.plan().len(), "Chart written");
    term::success(format!("Wrote {}", path.display()));

    Ok(())
}

fn print_plan(delay: &Delay, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for line in render_table(delay) {
                term::output(line);
            }
            if !delay.plan().is_empty() {
                term::hint(drift_summary(delay));
            }
        }
        OutputFormat::Plain => term::output(delay.describe().trim_end()),
        OutputFormat::Json => term::output(render_json(delay)?),
    }

    Ok(())
}
