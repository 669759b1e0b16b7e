use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while resolving or dispatching a node
#[derive(Error, Debug, Clone)]
pub enum SelectorError {
    /// The requested combination has no entry in the resolution table
    #[error("No resolution for mode={mode}, aspect_ratio={aspect_ratio}, quality={quality}")]
    LookupMiss {
        mode: Arc<String>,
        aspect_ratio: Arc<String>,
        quality: Arc<String>,
    },

    /// A value outside one of the closed input enumerations
    #[error("Unknown {field} option: {value}")]
    UnknownOption {
        field: &'static str,
        value: Arc<String>,
    },

    /// No node is registered under the given identifier
    #[error("Unknown node: {0}")]
    UnknownNode(Arc<String>),

    /// Parameter validation error
    #[error("Invalid parameter: {field} - {message}")]
    ParameterValidation {
        field: Arc<String>,
        message: Arc<String>,
    },

    /// Error when serializing data
    #[error("Serialization error: {0}")]
    Serialization(Arc<String>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(Arc<String>),
}

/// Type alias for Result with SelectorError
pub type Result<T> = std::result::Result<T, SelectorError>;

impl SelectorError {
    pub fn parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParameterValidation {
            field: Arc::new(field.into()),
            message: Arc::new(message.into()),
        }
    }

    /// True for errors caused by the caller's input rather than by the node
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownOption { .. } | Self::ParameterValidation { .. } | Self::UnknownNode(_)
        )
    }
}

impl From<serde_json::Error> for SelectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_message_names_combination() {
        let err = SelectorError::LookupMiss {
            mode: Arc::new("bogus".to_string()),
            aspect_ratio: Arc::new("Horizontal".to_string()),
            quality: Arc::new("HQ".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "No resolution for mode=bogus, aspect_ratio=Horizontal, quality=HQ"
        );
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_parameter_error_is_invalid_input() {
        let err = SelectorError::parameter("mode", "expected a string");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: mode - expected a string"
        );
        assert!(err.is_invalid_input());
        assert!(err.clone().is_invalid_input());
    }
}
