//! Multi-criteria filtering over catalog items.
//!
//! Categories combine with AND; an empty brand or type set, an empty search
//! string, and an empty feature set each pass every item. Results are always
//! ordered by (brand, model).

use crate::catalog::ItemRecord;
use crate::classify::{classify_ram, has_dedicated_gpu};
use anyhow::{Result, bail};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// "Must have" feature toggles.
pub enum Feature {
    Wwan,
    Esim,
    DedicatedGpu,
    UpgradableRam,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Wwan,
        Feature::Esim,
        Feature::DedicatedGpu,
        Feature::UpgradableRam,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Wwan => "WWAN (LTE/5G)",
            Feature::Esim => "eSIM Support",
            Feature::DedicatedGpu => "Dedicated GPU",
            Feature::UpgradableRam => "Upgradable RAM",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Feature::Wwan => "wwan",
            Feature::Esim => "esim",
            Feature::DedicatedGpu => "gpu",
            Feature::UpgradableRam => "ram",
        }
    }

    pub fn matches(&self, item: &ItemRecord) -> bool {
        match self {
            Feature::Wwan => item.spec().has_wwan,
            Feature::Esim => item.spec().has_esim,
            Feature::DedicatedGpu => has_dedicated_gpu(item),
            Feature::UpgradableRam => classify_ram(item).is_upgradable(),
        }
    }
}

impl TryFrom<&str> for Feature {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        let wanted = value.trim();
        for feature in Feature::ALL {
            if wanted.eq_ignore_ascii_case(feature.short_name())
                || wanted.eq_ignore_ascii_case(feature.label())
            {
                return Ok(feature);
            }
        }
        bail!(
            "Unknown feature: {wanted} (expected one of {})",
            Feature::ALL
                .iter()
                .map(Feature::short_name)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Current filter selections.
pub struct Criteria {
    pub brands: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub features: BTreeSet<Feature>,
    pub text: String,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.types.insert(device_type.into());
        self
    }

    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.types.is_empty()
            && self.features.is_empty()
            && self.text.is_empty()
    }

    pub fn matches(&self, item: &ItemRecord) -> bool {
        if !self.brands.is_empty() && !self.brands.contains(item.brand()) {
            return false;
        }
        if !self.types.is_empty() {
            let device_type = item.spec().device_type.as_deref();
            if !device_type.is_some_and(|t| self.types.contains(t)) {
                return false;
            }
        }
        if !self.features.iter().all(|feature| feature.matches(item)) {
            return false;
        }
        self.text.is_empty() || item.search_blob().contains(&self.text.to_lowercase())
    }
}

/// Filter `items` by `criteria`, ordered by (brand, model).
pub fn query(items: &[ItemRecord], criteria: &Criteria) -> Vec<ItemRecord> {
    let mut results: Vec<ItemRecord> = items
        .iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect();
    results.sort_by(|a, b| (a.brand(), a.model()).cmp(&(b.brand(), b.model())));
    debug!(
        total = items.len(),
        matched = results.len(),
        "catalog query"
    );
    results
}
