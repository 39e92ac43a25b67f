//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: engine error (bad viewport, bad parameter values)
//! - 11: I/O error (snapshot write)
//! - 12: input error (bad background color, bad JSON params)
//! - 13: serialization error

use flowfield_core::EngineError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// The engine rejected its configuration.
    Engine(EngineError),
    /// Writing output failed.
    Io(String),
    /// A flag value could not be understood.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            EngineError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_exit_code_is_10() {
        let err = CliError::from(EngineError::InvalidDimensions {
            width: 0,
            height: 10,
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("0x10"));
    }

    #[test]
    fn io_error_routes_to_exit_code_11() {
        let err = CliError::from(EngineError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn invalid_color_routes_to_input() {
        let err = CliError::from(EngineError::InvalidColor("expected 6 hex digits".into()));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn invalid_param_stays_an_engine_error() {
        let err = CliError::from(EngineError::InvalidParam {
            name: "cell_size".into(),
            reason: "must be at least 1".into(),
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("cell_size"));
    }

    #[test]
    fn serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
