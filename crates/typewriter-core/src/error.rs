use thiserror::Error;

use crate::types::Phase;

/// Top-level error type for the typewriter crates.
///
/// The engine itself is total over valid inputs and never returns an error.
/// These variants cover the configuration boundary and the scheduler's
/// runtime requirements.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TypewriterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {phase} speed: {reason}")]
    InvalidSpeed { phase: Phase, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No tokio runtime available to drive the typewriter timer")]
    NoRuntime,
}

impl From<toml::de::Error> for TypewriterError {
    fn from(err: toml::de::Error) -> Self {
        TypewriterError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TypewriterError {
    fn from(err: toml::ser::Error) -> Self {
        TypewriterError::Config(err.to_string())
    }
}

/// A specialized `Result` type for typewriter operations.
pub type Result<T> = std::result::Result<T, TypewriterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypewriterError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_invalid_speed_display_names_phase() {
        let err = TypewriterError::InvalidSpeed {
            phase: Phase::Erasing,
            reason: "num_units must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid erasing speed: num_units must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TypewriterError = io_err.into();
        assert!(matches!(err, TypewriterError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "phrases = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: TypewriterError = err.unwrap_err().into();
        assert!(matches!(err, TypewriterError::Config(_)));
    }

    #[test]
    fn test_no_runtime_display() {
        let err = TypewriterError::NoRuntime;
        assert!(err.to_string().starts_with("No tokio runtime"));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<&'static str> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success")
        }

        assert_eq!(inner().unwrap(), "success");
    }
}
