//! Error types for key analysis

use std::fmt;

/// Errors that can occur during key analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// No audio samples were provided at all
    NoInputData,

    /// A required capability (e.g. chroma extraction) is not available
    DependencyUnavailable(String),

    /// Audio decoding error
    DecodingError(String),

    /// Processing error during analysis
    ProcessingError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::NoInputData => write!(f, "No audio data received"),
            AnalysisError::DependencyUnavailable(msg) => write!(f, "Dependency unavailable: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AnalysisError::NoInputData.to_string(), "No audio data received");
        assert_eq!(
            AnalysisError::DependencyUnavailable("chroma".to_string()).to_string(),
            "Dependency unavailable: chroma"
        );
        assert!(AnalysisError::InvalidInput("x".to_string())
            .to_string()
            .starts_with("Invalid input"));
    }
}
