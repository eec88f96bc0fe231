//! # BarkBoard Common Library
//!
//! Shared code for the BarkBoard services including:
//! - Canonical record types (DogRecord, ShortPost, ProposedChange)
//! - Upstream feed adapters (one per observed wire shape)
//! - Field normalizers (breed, location, age, images, gender)
//! - Catalog pipeline (filter, sort, view derivation)
//! - Favorites set with file persistence
//! - Event types (CatalogEvent enum) and EventBus
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod favorites;
pub mod ingest;
pub mod model;
pub mod normalize;

pub use error::{Error, Result};
