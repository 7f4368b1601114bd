//! Memoized catalog loading with explicit invalidation.

use crate::catalog::CatalogIndex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
/// Per-path memo of loaded catalogs.
///
/// A missing or unparsable document is memoized as an empty catalog; the
/// caller sees "no data" rather than an error. Nothing watches the file, so a
/// changed document is only picked up after `invalidate`.
pub struct CatalogCache {
    entries: BTreeMap<PathBuf, Arc<CatalogIndex>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog for `path`, loading it on first use.
    pub fn get(&mut self, path: &Path) -> Arc<CatalogIndex> {
        if let Some(hit) = self.entries.get(path) {
            return Arc::clone(hit);
        }
        let index = Arc::new(load_or_empty(path));
        self.entries.insert(path.to_path_buf(), Arc::clone(&index));
        index
    }

    /// Drop every memoized catalog so the next `get` re-reads from disk.
    pub fn invalidate(&mut self) {
        debug!(entries = self.entries.len(), "invalidating catalog cache");
        self.entries.clear();
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }
}

fn load_or_empty(path: &Path) -> CatalogIndex {
    if !path.is_file() {
        warn!(path = %path.display(), "catalog document not found; using empty catalog");
        return CatalogIndex::default();
    }
    match CatalogIndex::load(path) {
        Ok(index) => {
            debug!(path = %path.display(), items = index.len(), "loaded catalog");
            index
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "catalog unreadable; using empty catalog"
            );
            CatalogIndex::default()
        }
    }
}
