//! Common traits for dogbreeds.
//!
//! The lookup capability is a single-method trait so the cache can sit in
//! front of the HTTP client, the in-memory catalog, or a test double alike.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Read-only, shareable list of sub-breed names.
pub type SubBreeds = Arc<[String]>;

// ═══════════════════════════════════════════════════════════════════════════════
// BREED FETCHER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for sub-breed lookups.
///
/// Implementations might use:
/// - The dog.ceo REST API (production)
/// - An in-memory catalog (development/testing)
/// - A caching decorator over another fetcher
#[async_trait]
pub trait BreedFetcher: Send + Sync {
    /// Returns the sub-breeds of `breed`.
    ///
    /// Every failure, whether the breed is unknown or the source could not
    /// be read, is reported as [`BreedError::BreedNotFound`](crate::BreedError).
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: BreedFetcher + ?Sized> BreedFetcher for Arc<T> {
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        (**self).sub_breeds(breed).await
    }
}

#[async_trait]
impl<T: BreedFetcher + ?Sized> BreedFetcher for Box<T> {
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        (**self).sub_breeds(breed).await
    }
}
