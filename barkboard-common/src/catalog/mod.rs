//! Catalog pipeline: filter, sort, and view derivation
//!
//! The pipeline is three pure stages over an immutable record batch:
//! `filter` picks the survivors, `sort` orders them, `view` projects them
//! into display form. Each stage is independently testable and none holds
//! state between calls.

pub mod filter;
pub mod sort;
pub mod view;

pub use filter::{
    filter_catalog, filter_changes, filter_shorts, BreedChoice, ChangeFilter, FilterCriteria,
    FosterChoice, LocationBucket, Placement, ShortFilter,
};
pub use sort::{sort_catalog, sort_shorts, ShortSortKey, SortKey, SortOrder};
pub use view::{
    breed_options, category_options, derive_view, short_breed_options, CatalogView, ChangeView,
    DogView, ShortView,
};
