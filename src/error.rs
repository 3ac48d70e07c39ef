//! Error types for race assembly

use thiserror::Error;

/// Conditions that make a race impossible to represent.
///
/// Anything recoverable is recorded as a [`crate::diagnostics::Issue`]
/// instead; these abort only the race being assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Race distance must be greater than zero feet")]
    ZeroDistance,

    #[error("Race distance of {0} feet is shorter than one yard")]
    DistanceUnderOneYard(u32),

    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    #[error("Did not match a breed for {0}")]
    NoMatchingBreed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::UnknownCourse("Sand".to_string());
        assert_eq!(err.to_string(), "Unknown course: Sand");

        let err = ChartError::NoMatchingBreed("XX".to_string());
        assert!(err.to_string().contains("breed"));
    }
}
