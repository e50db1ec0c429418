//! Error type for construction-time failures.
//!
//! Runtime synchronization never fails: missing scenes and detached views
//! turn operations into no-ops. Only configuration loading and validation
//! can produce an [`Error`].

use thiserror::Error;

/// Errors produced while building a tab view.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The TOML configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Reading a configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message() {
        let err = Error::InvalidConfig("header_height must be >= 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: header_height must be >= 0"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn parse_error_converts() {
        let parse = toml::from_str::<toml::Value>("header_height = = 1").unwrap_err();
        let err: Error = parse.into();
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}
