use crate::domain::DurationParseError;
use thiserror::Error;

/// Exit codes following sysexits.h conventions where applicable.
/// See: https://man.freebsd.org/cgi/man.cgi?query=sysexits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// General error
    pub const FAILURE: Self = Self(1);
    /// Configuration error (invalid profile, unknown strategy)
    pub const CONFIG: Self = Self(78); // EX_CONFIG
    /// I/O error (file read/write failed)
    pub const IO: Self = Self(74); // EX_IOERR
    /// Data format error (TOML/JSON/duration parse error)
    pub const DATA: Self = Self(65); // EX_DATAERR
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.0 as u8)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize TOML '{path}': {source}")]
    TomlSerialize {
        path: String,
        #[source]
        source: toml::ser::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[source] serde_json::Error),

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    #[error("Unknown strategy '{0}' (available: exponential)")]
    UnknownStrategy(String),

    #[error(transparent)]
    InvalidDuration(#[from] DurationParseError),

    #[error("Failed to write output to '{path}': {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // I/O errors
            Error::Io(_)
            | Error::FileRead { .. }
            | Error::FileWrite { .. }
            | Error::OutputWrite { .. } => ExitCode::IO,
            // Data format errors
            Error::TomlParse { .. }
            | Error::TomlSerialize { .. }
            | Error::JsonSerialize(_)
            | Error::InvalidDuration(_) => ExitCode::DATA,
            // Configuration/validation errors
            Error::ConfigValidation(_) | Error::UnknownStrategy(_) => ExitCode::CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_is_a_config_error() {
        let err = Error::UnknownStrategy("linear".to_string());
        assert_eq!(err.exit_code(), ExitCode::CONFIG);
        assert_eq!(
            err.to_string(),
            "Unknown strategy 'linear' (available: exponential)"
        );
    }

    #[test]
    fn output_write_is_an_io_error() {
        let err = Error::OutputWrite {
            path: "plan.html".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.exit_code(), ExitCode::IO);
        assert!(err.to_string().contains("plan.html"));
    }

    #[test]
    fn duration_parse_is_a_data_error() {
        let err: Error = crate::domain::parse_duration("soon").unwrap_err().into();
        assert_eq!(err.exit_code(), ExitCode::DATA);
    }
}
