//! In-memory breed catalog.
//!
//! Fast, thread-safe fetcher suitable for development, testing,
//! and offline use.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::error::{BreedError, Result};
use crate::normalize::normalize_breed;
use crate::traits::BreedFetcher;

/// Catalog-backed [`BreedFetcher`].
///
/// Breed names are normalized on insert and on lookup, and sub-breeds are
/// returned sorted, matching what the remote catalog client produces.
#[derive(Debug, Default)]
pub struct InMemoryBreedFetcher {
    catalog: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryBreedFetcher {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a breed and its sub-breeds (builder style).
    pub fn with_breed<I, S>(self, breed: &str, sub_breeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(breed, sub_breeds);
        self
    }

    /// Adds or replaces a breed.
    pub fn insert<I, S>(&self, breed: &str, sub_breeds: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut subs: Vec<String> = sub_breeds.into_iter().map(Into::into).collect();
        subs.sort();
        self.catalog.write().insert(normalize_breed(Some(breed)), subs);
    }

    /// Returns the number of known breeds.
    pub fn len(&self) -> usize {
        self.catalog.read().len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.read().is_empty()
    }
}

#[async_trait]
impl BreedFetcher for InMemoryBreedFetcher {
    #[instrument(skip(self))]
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        let key = normalize_breed(Some(breed));
        let found = self.catalog.read().get(&key).cloned();

        match found {
            Some(subs) => {
                debug!(breed = %key, count = subs.len(), "Catalog hit");
                Ok(subs)
            }
            None => Err(BreedError::not_found(key, "not in catalog")),
        }
    }
}
