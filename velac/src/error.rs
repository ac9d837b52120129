//! Driver-level error type for the `velac` CLI.
//!
//! These are I/O and configuration failures that happen before or around
//! a parse, not source diagnostics -- a missing input file or a malformed
//! `velac.toml` is a `VelacError`, while a lex/parse error in the source
//! itself is a `Diagnostic` reported through `vela_util::Handler`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VelacError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read '{path}': {source}")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VelacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = VelacError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn test_read_source_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = VelacError::ReadSource {
            path: "foo.vela".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("foo.vela"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let velac_err: VelacError = io_err.into();
        assert!(matches!(velac_err, VelacError::Io(_)));
    }
}
