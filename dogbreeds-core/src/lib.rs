//! # dogbreeds Core
//!
//! Foundational building blocks shared by the other dogbreeds crates:
//!
//! - **Errors**: the two failure kinds a lookup or construction can produce
//! - **Traits**: the `BreedFetcher` capability every provider implements
//! - **Normalization**: the single lookup-key rule used by cache and client
//! - **Memory**: a catalog-backed fetcher for development and tests
//!
//! ## Example
//!
//! ```rust
//! use dogbreeds_core::{normalize_breed, BreedError};
//!
//! assert_eq!(normalize_breed(Some("  Husky ")), "husky");
//! assert!(BreedError::not_found("unicorn", "unknown breed").is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod memory;
pub mod normalize;
pub mod traits;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{BreedError, Result};
pub use memory::InMemoryBreedFetcher;
pub use normalize::normalize_breed;
pub use traits::{BreedFetcher, SubBreeds};
