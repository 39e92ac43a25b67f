//! Error types for the flow-field core.

use thiserror::Error;

/// Errors produced by engine construction, configuration, and snapshot output.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The viewport was empty or too small to hold a single flow-field cell.
    #[error("invalid dimensions: viewport {width}x{height} does not cover a single grid cell")]
    InvalidDimensions { width: usize, height: usize },

    /// A grid shape with no cells, or too many cells to address.
    #[error("invalid grid: {cols}x{rows} cells")]
    InvalidGrid { cols: usize, rows: usize },

    /// A parameter value is outside the range the engine can work with.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot or other output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_includes_viewport() {
        let err = EngineError::InvalidDimensions {
            width: 3,
            height: 0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("3x0"), "expected viewport in message, got: {msg}");
    }

    #[test]
    fn invalid_grid_reports_cell_counts() {
        let msg = EngineError::InvalidGrid { cols: 0, rows: 4 }.to_string();
        assert!(msg.contains("0x4 cells"), "expected grid shape in message, got: {msg}");
        assert!(!msg.contains("viewport"), "grid error mentions viewport: {msg}");
    }

    #[test]
    fn invalid_param_includes_name_and_reason() {
        let err = EngineError::InvalidParam {
            name: "cell_size".into(),
            reason: "must be at least 1".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("cell_size"), "missing param name in: {msg}");
        assert!(msg.contains("at least 1"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = EngineError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let err = EngineError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
