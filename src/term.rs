use crate::cli::ColorChoice;
use console::{Emoji, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

static EMOJI_SUCCESS: Emoji<'_, '_> = Emoji("✔ ", "+ ");
static EMOJI_WARNING: Emoji<'_, '_> = Emoji("⚠ ", "! ");
static EMOJI_ERROR: Emoji<'_, '_> = Emoji("✖ ", "x ");

static QUIET_MODE: OnceLock<bool> = OnceLock::new();
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initializes the terminal output settings.
/// Should be called once at startup with CLI args.
pub fn init(quiet: bool, color: ColorChoice) {
    QUIET_MODE.set(quiet).ok();

    let no_color = std::env::var("NO_COLOR").is_ok();
    let color_enabled = if no_color {
        // NO_COLOR standard: https://no-color.org/
        false
    } else {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled(),
        }
    };
    COLOR_ENABLED.set(color_enabled).ok();

    if color == ColorChoice::Always && !no_color {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(true);
    } else if !color_enabled {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Creates a spinner with the given message.
/// Returns a hidden spinner in quiet mode.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Prints a success message with a green checkmark.
pub fn success(message: impl Display) {
    if is_quiet() {
        return;
    }
    println!("{} {}", EMOJI_SUCCESS, style(message).green());
}

/// Prints a warning message with a yellow warning sign to stderr.
pub fn warning(message: impl Display) {
    eprintln!("{} {}", EMOJI_WARNING, style(message).yellow());
}

/// Prints an error message with a red X to stderr.
pub fn error(message: impl Display) {
    eprintln!("  {} {}", EMOJI_ERROR, style(message).red());
}

/// Prints a blank line.
pub fn blank() {
    if is_quiet() {
        return;
    }
    println!();
}

/// Prints a hint/next step message in dim style.
pub fn hint(message: impl Display) {
    if is_quiet() {
        return;
    }
    println!("  {}", style(message).dim());
}

/// Prints command output. Unlike the other helpers this ignores quiet mode.
pub fn output(message: impl Display) {
    println!("{}", message);
}
