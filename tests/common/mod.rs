use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test environment for integration tests.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new test environment with temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("delays.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes content to the profile file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Runs the `delays` binary inside the temp directory with a clean environment.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_delays"));
        for var in [
            "DELAYS_CONFIG",
            "DELAYS_STRATEGY",
            "DELAYS_TOTAL_DURATION",
            "DELAYS_ATTEMPTS",
            "DELAYS_EXPONENT",
            "DELAYS_OUTPUT",
        ] {
            command.env_remove(var);
        }
        command
            .args(args)
            .env("NO_COLOR", "1")
            .current_dir(self.path())
            .output()
            .expect("failed to run delays")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Profile matching the 30s / 10 attempts / exponent 2 scenario.
pub const SAMPLE_CONFIG: &str = r#"[plan]
strategy = "exponential"
total_duration = "30s"
attempts = 10
exponent = 2.0
"#;
