//! Badge and status derivation from free-text spec fields.
//!
//! Everything here is a pure function of an item; absent fields behave as
//! empty text and never match.

use crate::catalog::{ItemRecord, SpecRecord};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Shown when a CPU string is absent or reduces to nothing.
pub const CPU_PLACEHOLDER: &str = "N/A";
const CPU_PREVIEW_TOKENS: usize = 4;
const ELLIPSIS: &str = "...";

static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("static regex"));

static DEDICATED_GPU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)NVIDIA|AMD|Radeon|RTX|Quadro|Discrete|Dedicated").expect("static regex")
});

// Keyword order matters only for keywords sharing a prefix at one position.
const PORT_GLYPHS: &[(&str, &str)] = &[
    ("USB-C", "🔌"),
    ("Thunderbolt", "⚡"),
    ("HDMI", "🖥️"),
    ("DisplayPort", "📺"),
    ("RJ45", "🌐"),
    ("Ethernet", "🌐"),
    ("USB-A", "🖱️"),
    ("USB 3", "🖱️"),
    ("Headphone", "🎧"),
    ("Audio", "🎧"),
    ("SD Card", "💾"),
    ("Smart Card", "💳"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RamStatus {
    Upgradable,
    Partial,
    Soldered,
}

impl RamStatus {
    pub fn color_tag(&self) -> &'static str {
        match self {
            RamStatus::Upgradable => "green",
            RamStatus::Partial => "orange",
            RamStatus::Soldered => "red",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RamStatus::Upgradable => "Upgradable",
            RamStatus::Partial => "Partial",
            RamStatus::Soldered => "Soldered",
        }
    }

    pub fn dot(&self) -> &'static str {
        match self {
            RamStatus::Upgradable => "🟢",
            RamStatus::Partial => "🟠",
            RamStatus::Soldered => "🔴",
        }
    }

    /// Anything short of fully soldered counts for the "Upgradable RAM" filter.
    pub fn is_upgradable(&self) -> bool {
        !matches!(self, RamStatus::Soldered)
    }
}

/// Classify RAM upgradability from the `ram_slots` and `ram_soldered` texts.
pub fn classify_ram(item: &ItemRecord) -> RamStatus {
    let spec = item.spec();
    ram_status_from(
        SpecRecord::text(&spec.ram_slots),
        SpecRecord::text(&spec.ram_soldered),
    )
}

/// First matching rule wins; all comparisons are case-insensitive.
pub fn ram_status_from(ram_slots: &str, ram_soldered: &str) -> RamStatus {
    let slots = ram_slots.to_lowercase();
    let soldered = ram_soldered.to_lowercase();

    let no_expansion =
        slots.contains("soldered") || slots.contains("no slots") || slots.trim().starts_with('0');
    if no_expansion {
        if slots.contains("1 slot") || slots.contains('+') || soldered.contains("partial") {
            return RamStatus::Partial;
        }
        return RamStatus::Soldered;
    }
    if soldered.contains("partial") {
        return RamStatus::Partial;
    }
    if soldered.contains("yes") || soldered.contains("soldered") {
        return RamStatus::Soldered;
    }
    RamStatus::Upgradable
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStatus {
    Upgradable,
    Soldered,
}

impl StorageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StorageStatus::Upgradable => "Upgradable Storage",
            StorageStatus::Soldered => "Soldered Storage",
        }
    }
}

pub fn classify_storage(item: &ItemRecord) -> StorageStatus {
    let slots = SpecRecord::text(&item.spec().storage_slots);
    if slots.contains("Soldered") || slots.contains("eMMC") {
        StorageStatus::Soldered
    } else {
        StorageStatus::Upgradable
    }
}

pub fn has_tpm(item: &ItemRecord) -> bool {
    SpecRecord::text(&item.spec().security_tpm).contains("TPM")
}

pub fn has_dedicated_gpu(item: &ItemRecord) -> bool {
    DEDICATED_GPU.is_match(SpecRecord::text(&item.spec().gpu))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Laptop,
    Desktop,
}

impl DeviceKind {
    pub fn of(item: &ItemRecord) -> Self {
        if item.device_type().contains("Laptop") {
            DeviceKind::Laptop
        } else {
            DeviceKind::Desktop
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            DeviceKind::Laptop => "💻",
            DeviceKind::Desktop => "🖥️",
        }
    }
}

/// Prefix every known port keyword with its glyph.
///
/// The text is scanned once left to right, so inserted glyphs are never
/// matched again and each occurrence is annotated exactly once.
pub fn format_ports(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some((keyword, glyph)) = PORT_GLYPHS.iter().find(|(k, _)| rest.starts_with(k)) {
            out.push_str(glyph);
            out.push(' ');
            out.push_str(keyword);
            rest = &rest[keyword.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

/// Short CPU label for summary cards: parenthesized groups removed, first
/// four words kept.
pub fn preview_cpu(text: &str) -> String {
    let stripped = PAREN_GROUP.replace_all(text, "");
    let tokens: Vec<&str> = stripped.split_whitespace().take(CPU_PREVIEW_TOKENS).collect();
    if tokens.is_empty() {
        return CPU_PLACEHOLDER.to_string();
    }
    format!("{}{ELLIPSIS}", tokens.join(" "))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Blue,
    Green,
    Orange,
    Red,
    Purple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub tone: BadgeTone,
    pub glyph: &'static str,
    pub label: String,
}

impl Badge {
    fn new(tone: BadgeTone, glyph: &'static str, label: impl Into<String>) -> Self {
        Self {
            tone,
            glyph,
            label: label.into(),
        }
    }
}

/// Badges for the detail view, in display order.
pub fn detail_badges(item: &ItemRecord) -> Vec<Badge> {
    let spec = item.spec();
    let mut badges = vec![Badge::new(
        BadgeTone::Neutral,
        DeviceKind::of(item).glyph(),
        item.device_type(),
    )];
    if spec.has_wwan {
        badges.push(Badge::new(BadgeTone::Blue, "📡", "WWAN Ready"));
    }
    if spec.has_esim {
        badges.push(Badge::new(BadgeTone::Green, "📲", "eSIM"));
    }

    let ram = classify_ram(item);
    badges.push(match ram {
        RamStatus::Soldered => Badge::new(BadgeTone::Red, "🔒", ram.label()),
        RamStatus::Partial => Badge::new(BadgeTone::Orange, "⚠️", ram.label()),
        RamStatus::Upgradable => Badge::new(BadgeTone::Green, "🛠️", ram.label()),
    });

    let storage = classify_storage(item);
    badges.push(match storage {
        StorageStatus::Soldered => Badge::new(BadgeTone::Red, "🔒", storage.label()),
        StorageStatus::Upgradable => Badge::new(BadgeTone::Green, "💾", storage.label()),
    });

    if has_tpm(item) {
        badges.push(Badge::new(BadgeTone::Purple, "🛡️", "TPM"));
    }
    badges
}

/// Compact badges for grid cards.
pub fn card_badges(item: &ItemRecord) -> Vec<&'static str> {
    let spec = item.spec();
    let mut badges = Vec::new();
    if spec.has_wwan {
        badges.push("📡 WWAN");
    }
    if spec.has_esim {
        badges.push("📲 eSIM");
    }
    // Narrower than the dedicated-GPU filter.
    let gpu = SpecRecord::text(&spec.gpu);
    if gpu.contains("NVIDIA") || gpu.contains("Discrete") {
        badges.push("🎮 GPU");
    }
    badges
}
