//! dog.ceo client for dogbreeds sub-breed lookups.
//!
//! Talks to the public breed catalog and reports every failure as
//! `BreedError::BreedNotFound`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod client;

pub use client::{DogApiBreedFetcher, DogApiConfig};
