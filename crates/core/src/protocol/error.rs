use thiserror::Error;

/// Errors that can occur when encoding or decoding wire messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(String),
    #[error("Empty message line")]
    EmptyLine,
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

impl From<serde_json::Error> for ProtocolError {
    fn from(error: serde_json::Error) -> Self {
        ProtocolError::Json(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_display() {
        assert_eq!(ProtocolError::EmptyLine.to_string(), "Empty message line");
    }

    #[test]
    fn test_json_error_conversion() {
        let error = serde_json::from_str::<u32>("nope").unwrap_err();
        let protocol_error = ProtocolError::from(error);

        assert!(matches!(protocol_error, ProtocolError::Json(_)));
        assert!(protocol_error.to_string().starts_with("Malformed message: "));
    }
}
