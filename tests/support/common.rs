#![allow(dead_code)]

use anyhow::{Context, Result};
use hwcatalog::{CatalogIndex, ItemRecord, parse_catalog};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Catalog document written to a temp dir; removed when dropped.
pub struct TempCatalog {
    dir: TempDir,
    path: PathBuf,
}

impl TempCatalog {
    pub fn write(document: &Value) -> Result<Self> {
        let dir = TempDir::new().context("creating temp dir")?;
        let path = dir.path().join("hardware_db.json");
        fs::write(&path, serde_json::to_vec_pretty(document)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn rewrite(&self, document: &Value) -> Result<()> {
        fs::write(&self.path, serde_json::to_vec_pretty(document)?)
            .with_context(|| format!("rewriting {}", self.path.display()))
    }
}

// A small mixed catalog covering every filter category.
pub fn sample_document() -> Value {
    json!({
        "Dell": {
            "Latitude 5420": {
                "type": "Laptop",
                "sub_model": "Business 14\"",
                "cpu": "Intel(R) Core(TM) i7-1185G7 vPro",
                "gpu": "Intel Iris Xe",
                "ram_max": "64GB",
                "ram_slots": "2 SODIMM",
                "ram_soldered": "No",
                "has_wwan": true,
                "has_esim": false,
                "sim_slot_type": "Nano SIM",
                "modem_pn": "DW5821e",
                "ports": "2x USB-C, HDMI, RJ45"
            },
            "Precision 5680": {
                "type": "Mobile Workstation",
                "cpu": "Intel Core i9-13900H",
                "gpu": "NVIDIA RTX 4060",
                "ram_max": "64GB",
                "ram_slots": "Soldered",
                "ram_soldered": "yes",
                "has_wwan": false,
                "has_esim": false
            },
            "OptiPlex 7010": {
                "type": "Desktop",
                "cpu": "Intel Core i5-13500",
                "gpu": "AMD Radeon RX 6500",
                "ram_max": "128GB",
                "ram_slots": "4 DIMM"
            }
        },
        "Lenovo": {
            "ThinkPad T14s Gen 4": {
                "type": "Laptop",
                "cpu": "AMD Ryzen 7 PRO 7840U",
                "gpu": "Integrated",
                "ram_max": "32GB",
                "ram_slots": "Soldered + 1 slot",
                "has_wwan": true,
                "has_esim": true,
                "power_pn": "ADLX65YDC2A"
            }
        },
        "HP": {
            "EliteBook 840 G10": {
                "type": "Laptop",
                "cpu": "Intel Core i5-1345U",
                "ram_slots": "2",
                "ram_soldered": "Partial"
            }
        }
    })
}

pub fn sample_items() -> Vec<ItemRecord> {
    parse_catalog(sample_document().to_string().as_bytes()).expect("sample catalog parses")
}

pub fn sample_index() -> CatalogIndex {
    CatalogIndex::from_items(sample_items())
}

pub fn ids(items: &[ItemRecord]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

pub fn run_cli(catalog: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_hwcatalog"))
        .arg("--db")
        .arg(catalog)
        .args(args)
        .env_remove("HWCATALOG_DB")
        .env_remove("RUST_LOG")
        .output()
        .context("failed to execute hwcatalog")
}
