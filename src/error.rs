//! Crate-level error types.

use std::fmt;

/// Errors produced by the halo crate.
#[derive(Debug)]
pub enum HaloError {
    /// A precondition on caller-supplied input was violated (negative
    /// particle count, non-positive radius, degenerate mesh resolution...).
    InvalidArgument(String),
    /// GPU context initialization failure (surface, adapter, or device).
    Gpu(String),
    /// WGSL composition or validation failure.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl HaloError {
    /// Shorthand for building an [`HaloError::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl fmt::Display for HaloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            Self::Gpu(msg) => write!(f, "GPU error: {msg}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for HaloError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HaloError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = HaloError::invalid("particle count must be >= 0, got -5");
        assert_eq!(
            err.to_string(),
            "invalid argument: particle count must be >= 0, got -5"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn gpu_error_display() {
        let err = HaloError::Gpu("no usable adapter".into());
        assert_eq!(err.to_string(), "GPU error: no usable adapter");
    }

    #[test]
    fn io_error_exposes_source() {
        let err = HaloError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(matches!(err, HaloError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
