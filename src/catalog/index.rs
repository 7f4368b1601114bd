//! Indexed view of one loaded catalog snapshot.
//!
//! Items are kept in (brand, model) order and looked up by id through a
//! deterministic BTreeMap. Duplicate ids are not rejected; the first item in
//! canonical order owns the id.

use crate::catalog::{ItemId, ItemRecord, SpecRecord, load_catalog_from_path};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Default, Clone)]
/// Immutable item collection plus a derived index keyed by item id.
pub struct CatalogIndex {
    items: Vec<ItemRecord>,
    by_id: BTreeMap<ItemId, usize>,
}

impl CatalogIndex {
    /// Load and index the catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let items =
            load_catalog_from_path(path).with_context(|| format!("indexing {}", path.display()))?;
        Ok(Self::from_items(items))
    }

    /// Index already-parsed items, sorting them by (brand, model).
    pub fn from_items(mut items: Vec<ItemRecord>) -> Self {
        items.sort_by(|a, b| (a.brand(), a.model()).cmp(&(b.brand(), b.model())));
        let mut by_id = BTreeMap::new();
        for (pos, item) in items.iter().enumerate() {
            by_id.entry(item.id().clone()).or_insert(pos);
        }
        Self { items, by_id }
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve an item by id.
    ///
    /// Returns `None` instead of erroring; callers decide how to surface the
    /// miss (the view layer turns it into `View::NotFound`).
    pub fn item(&self, id: &ItemId) -> Option<&ItemRecord> {
        self.by_id.get(id).map(|pos| &self.items[*pos])
    }

    /// Iterates item ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.by_id.keys()
    }

    /// Distinct brands, sorted.
    pub fn brands(&self) -> Vec<&str> {
        let brands: BTreeSet<&str> = self.items.iter().map(ItemRecord::brand).collect();
        brands.into_iter().collect()
    }

    /// Distinct non-empty device types, sorted.
    pub fn types(&self) -> Vec<&str> {
        let types: BTreeSet<&str> = self
            .items
            .iter()
            .filter_map(|item| SpecRecord::non_empty(&item.spec().device_type))
            .collect();
        types.into_iter().collect()
    }
}
