//! Error types for dogbreeds.
//!
//! Every failure a provider can hit while resolving a breed (unknown breed,
//! transport error, bad payload) is reported as [`BreedError::BreedNotFound`].
//! `reason` keeps the detail for logs; callers only branch on the kind.

use thiserror::Error;

/// Result type alias using `BreedError`.
pub type Result<T> = std::result::Result<T, BreedError>;

/// Main error type for all dogbreeds operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreedError {
    /// A required argument was missing or unusable at construction time.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The breed is unknown, or its sub-breeds could not be produced.
    #[error("Breed not found: '{breed}' ({reason})")]
    BreedNotFound {
        /// Breed name as it was sent to the provider.
        breed: String,
        /// What went wrong.
        reason: String,
    },
}

impl BreedError {
    /// Builds a `BreedNotFound` error.
    pub fn not_found(breed: impl Into<String>, reason: impl Into<String>) -> Self {
        BreedError::BreedNotFound {
            breed: breed.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BreedError::BreedNotFound { .. })
    }

    /// Returns true if this is a construction-time argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BreedError::InvalidArgument(_))
    }
}
