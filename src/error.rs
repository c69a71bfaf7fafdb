//! Error taxonomy for the analysis pipeline
//!
//! Configuration errors are fatal and surface before any image is touched.
//! Decode, empty-histogram and invalid-digit errors are per-image: the batch
//! iterator turns them into [`crate::models::SkippedImage`] values.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while computing digit statistics
#[derive(Error, Debug)]
pub enum BenfordError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No countable samples: every sample was zero or the image is empty")]
    EmptyHistogram,

    #[error("Value {value} has no leading digit in 1..=9")]
    InvalidDigit { value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenfordError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        BenfordError::Configuration(msg.into())
    }

    /// Whether this error should stop the whole run rather than a single image
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BenfordError::Configuration(_)
                | BenfordError::Io(_)
                | BenfordError::Csv(_)
                | BenfordError::Json(_)
        )
    }
}

pub type BenfordResult<T> = Result<T, BenfordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_is_fatal() {
        assert!(BenfordError::config("min equals max").is_fatal());
        assert!(!BenfordError::EmptyHistogram.is_fatal());
        assert!(!BenfordError::InvalidDigit { value: 0.0 }.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = BenfordError::config("target range min (3) equals max (3)");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: target range min (3) equals max (3)"
        );
        let err = BenfordError::InvalidDigit { value: -2.5 };
        assert!(err.to_string().contains("-2.5"));
    }
}
