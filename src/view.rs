//! Grid and detail views driven by an explicit selection value.
//!
//! The caller owns the `Selection`; nothing here keeps global state. A
//! selection that no longer resolves (for example after a reload dropped the
//! model) becomes `View::NotFound` and the caller recovers by clearing it.

use crate::catalog::{CatalogIndex, ItemId, ItemRecord, SpecRecord};
use crate::classify::{
    Badge, RamStatus, card_badges, classify_ram, detail_badges, format_ports, preview_cpu,
};
use crate::query::{Criteria, query};

const SIM_NOT_APPLICABLE: &str = "N/A";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Which item, if any, is currently open.
pub struct Selection {
    current: Option<ItemId>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: ItemId) {
        self.current = Some(id);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ItemId> {
        self.current.as_ref()
    }

    /// Build the view for this selection over `index`.
    ///
    /// Filters only shape the grid; an open item is shown even when the
    /// current criteria would hide it.
    pub fn resolve<'a>(&self, index: &'a CatalogIndex, criteria: &Criteria) -> View<'a> {
        match &self.current {
            None => View::Grid {
                cards: query(index.items(), criteria)
                    .iter()
                    .map(CardSummary::from_item)
                    .collect(),
            },
            Some(id) => match index.item(id) {
                Some(item) => View::Detail(DetailView::from_item(item)),
                None => View::NotFound(id.clone()),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View<'a> {
    Grid { cards: Vec<CardSummary> },
    Detail(DetailView<'a>),
    NotFound(ItemId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One result card in the grid.
pub struct CardSummary {
    pub id: ItemId,
    pub title: String,
    pub sub_model: String,
    pub cpu: String,
    pub cpu_preview: String,
    pub ram_status: RamStatus,
    pub ram_max: String,
    pub badges: Vec<&'static str>,
}

impl CardSummary {
    pub fn from_item(item: &ItemRecord) -> Self {
        let spec = item.spec();
        let cpu = SpecRecord::text(&spec.cpu);
        Self {
            id: item.id().clone(),
            title: item.display_name().to_string(),
            sub_model: SpecRecord::text(&spec.sub_model).to_string(),
            cpu: cpu.to_string(),
            cpu_preview: preview_cpu(cpu),
            ram_status: classify_ram(item),
            ram_max: SpecRecord::text(&spec.ram_max).to_string(),
            badges: card_badges(item),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Everything the detail page shows beyond the raw item fields.
pub struct DetailView<'a> {
    pub item: &'a ItemRecord,
    pub badges: Vec<Badge>,
    pub ram_status: RamStatus,
    pub ports: Option<String>,
    pub sim: String,
    pub modem_pn: Option<&'a str>,
    pub warnings: Vec<&'static str>,
}

impl<'a> DetailView<'a> {
    pub fn from_item(item: &'a ItemRecord) -> Self {
        let spec = item.spec();
        let (sim, modem_pn, warnings) = if spec.has_wwan {
            (
                SpecRecord::text(&spec.sim_slot_type).to_string(),
                SpecRecord::non_empty(&spec.modem_pn),
                vec!["Check Antennas", "Check Port"],
            )
        } else {
            (SIM_NOT_APPLICABLE.to_string(), None, Vec::new())
        };
        Self {
            item,
            badges: detail_badges(item),
            ram_status: classify_ram(item),
            ports: SpecRecord::non_empty(&spec.ports).map(format_ports),
            sim,
            modem_pn,
            warnings,
        }
    }
}
