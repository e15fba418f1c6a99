//! Caching decorator for dogbreeds lookups.
//!
//! Wraps any `BreedFetcher`, memoizes successful lookups by normalized
//! breed name, and counts calls made to the wrapped fetcher.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod cache;

pub use cache::{CacheStats, CachingBreedFetcher};
