//! Hardware catalog loading.
//!
//! The on-disk document maps brand -> model -> spec object. `model` parses it
//! into flat `ItemRecord`s, `CatalogIndex` holds one loaded snapshot with
//! lookup by id, and `CatalogCache` memoizes snapshots per path until the
//! caller invalidates them.

pub mod cache;
pub mod index;
pub mod model;

pub use cache::CatalogCache;
pub use index::CatalogIndex;
pub use model::{ItemId, ItemRecord, SpecRecord, WwanModule, load_catalog_from_path, parse_catalog};

/// Default relative path to the catalog document.
pub const DEFAULT_CATALOG_PATH: &str = "hardware_db.json";
