//! # matchpick Common Library
//!
//! Shared code for the matchpick service including:
//! - Match and catalog models
//! - Scoring heuristic and ranking
//! - Fallback store (flat JSON file)
//! - Match sources (scraped / fallback)
//! - Daily picks shuffle
//! - Configuration loading

pub mod config;
pub mod error;
pub mod models;
pub mod picks;
pub mod ranking;
pub mod scoring;
pub mod source;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use models::{Catalog, Match, ScoredMatch};
pub use ranking::{TargetDay, TopMatches};
pub use scoring::ScoringProfile;
pub use store::{CatalogLoad, FallbackStore};
