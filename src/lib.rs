//! Hardware specification catalog.
//!
//! Loads a read-only `brand -> model -> spec` JSON document into flat item
//! records, derives badges from the free-text spec fields, and filters the
//! collection for a presentation layer (the `hwcatalog` binary is one).

pub mod catalog;
pub mod classify;
pub mod query;
pub mod view;

pub use catalog::{
    CatalogCache, CatalogIndex, DEFAULT_CATALOG_PATH, ItemId, ItemRecord, SpecRecord, WwanModule,
    load_catalog_from_path, parse_catalog,
};
pub use classify::{
    Badge, DeviceKind, RamStatus, StorageStatus, card_badges, classify_ram, classify_storage,
    detail_badges, format_ports, has_dedicated_gpu, has_tpm, preview_cpu,
};
pub use query::{Criteria, Feature, query};
pub use view::{CardSummary, DetailView, Selection, View};

use std::path::PathBuf;

/// Environment variable consulted when no explicit catalog path is given.
pub const ENV_CATALOG_PATH: &str = "HWCATALOG_DB";

/// Resolve the catalog document path.
///
/// Precedence: explicit path, then a non-empty `HWCATALOG_DB` value, then
/// `hardware_db.json` relative to the working directory. The env value is
/// passed in so callers decide where it comes from.
pub fn resolve_catalog_path(explicit: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(DEFAULT_CATALOG_PATH),
    }
}

/// Split comma-separated CLI values into trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
