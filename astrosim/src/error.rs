//! Crate-wide error type.
//!
//! Construction problems surface as [`Error::InvalidParameter`] and leave the
//! universe untouched. A step that would produce non-finite state is rejected
//! with [`Error::NumericalInstability`] before anything is committed.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected argument to a construction call or configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A step produced (or would produce) a non-finite quantity.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Malformed YAML configuration.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub(crate) fn unstable(msg: impl Into<String>) -> Self {
        Error::NumericalInstability(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::invalid("mass must be > 0, got -1");
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("mass"));

        let e = Error::unstable("zero separation between bodies 0 and 1");
        assert!(format!("{e}").starts_with("numerical instability"));
    }
}
