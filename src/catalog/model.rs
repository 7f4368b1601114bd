//! Catalog document types and the flattening parser.
//!
//! Spec objects are free-form in the source document, so every field is
//! optional and tolerant of the wrong JSON shape: numbers and booleans are
//! rendered as text, anything else is treated as absent.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Stable item identifier, `brand + "_" + model`.
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(brand: &str, model: &str) -> Self {
        Self(format!("{brand}_{model}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
/// One row of a WWAN module compatibility table.
pub struct WwanModule {
    #[serde(
        default,
        alias = "Module",
        alias = "name",
        alias = "module_name",
        deserialize_with = "lenient_text"
    )]
    pub module: Option<String>,
    #[serde(
        default,
        alias = "P/N",
        alias = "Part Number",
        alias = "pn",
        deserialize_with = "lenient_text"
    )]
    pub part_number: Option<String>,
    #[serde(
        default,
        alias = "eSIM",
        alias = "esim_support",
        deserialize_with = "lenient_text"
    )]
    pub esim: Option<String>,
    #[serde(
        default,
        alias = "Tray P/N",
        alias = "tray_part_number",
        deserialize_with = "lenient_text"
    )]
    pub tray_pn: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Specification object for one model, as stored in the document.
pub struct SpecRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sub_model: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cpu: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gpu: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ram_max: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ram_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ram_slots: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ram_soldered: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub storage_slots: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub security_tpm: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub screen_options: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub webcam: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub biometrics: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ports: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wifi_bt: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub has_wwan: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub has_esim: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sim_slot_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub modem_pn: Option<String>,
    #[serde(default, deserialize_with = "lenient_modules")]
    pub wwan_modules: Vec<WwanModule>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub power_watts: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub power_connector: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub power_pn: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub battery_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub support_os: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub expert_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_links")]
    pub pdf_links: Vec<String>,
}

impl SpecRecord {
    /// Field text with absence rendered as the empty string.
    pub fn text(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or_default()
    }

    /// Field text only when present and non-blank.
    pub fn non_empty(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|value| !value.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Flattened catalog entry: one per (brand, model) pair.
///
/// Fields are private so the derived `search_blob` cannot drift from the
/// values it was built from.
pub struct ItemRecord {
    id: ItemId,
    brand: String,
    model: String,
    display_name: String,
    #[serde(flatten)]
    spec: SpecRecord,
    #[serde(skip)]
    search_blob: String,
}

impl ItemRecord {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, spec: SpecRecord) -> Self {
        let brand = brand.into();
        let model = model.into();
        let search_blob = build_search_blob(&brand, &model, &spec);
        Self {
            id: ItemId::new(&brand, &model),
            display_name: format!("{brand} {model}"),
            brand,
            model,
            spec,
            search_blob,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn spec(&self) -> &SpecRecord {
        &self.spec
    }

    /// Device type text, empty when absent.
    pub fn device_type(&self) -> &str {
        SpecRecord::text(&self.spec.device_type)
    }

    /// Lower-cased text the free-text search matches against.
    pub fn search_blob(&self) -> &str {
        &self.search_blob
    }
}

fn build_search_blob(brand: &str, model: &str, spec: &SpecRecord) -> String {
    format!(
        "{brand} {model} {} {} {} {} {}",
        SpecRecord::text(&spec.cpu),
        SpecRecord::text(&spec.gpu),
        SpecRecord::text(&spec.power_pn),
        SpecRecord::text(&spec.modem_pn),
        SpecRecord::text(&spec.device_type),
    )
    .to_lowercase()
}

/// Parse a catalog document into flat item records.
///
/// The top level must be an object of brand objects whose values are spec
/// objects. Output is ordered by (brand, model).
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<ItemRecord>> {
    let document: BTreeMap<String, BTreeMap<String, SpecRecord>> =
        serde_json::from_slice(bytes).context("parsing catalog document")?;

    let mut items = Vec::new();
    for (brand, models) in document {
        for (model, spec) in models {
            items.push(ItemRecord::new(brand.as_str(), model, spec));
        }
    }
    Ok(items)
}

pub fn load_catalog_from_path(path: &Path) -> Result<Vec<ItemRecord>> {
    let bytes = fs::read(path).with_context(|| format!("reading catalog {}", path.display()))?;
    parse_catalog(&bytes).with_context(|| format!("loading catalog {}", path.display()))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

fn lenient_modules<'de, D>(deserializer: D) -> Result<Vec<WwanModule>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(rows)) = value else {
        return Ok(Vec::new());
    };
    Ok(rows
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect())
}

fn lenient_links<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(links)) = value else {
        return Ok(Vec::new());
    };
    Ok(links.into_iter().filter_map(value_to_text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Vec<ItemRecord> {
        parse_catalog(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn flattens_brand_and_model_into_ids() {
        let items = parse(json!({
            "Lenovo": {"T14 Gen 4": {"type": "Laptop"}},
            "Dell": {"5420": {"type": "Laptop"}, "7010": {"type": "Desktop"}}
        }));
        let ids: Vec<&str> = items.iter().map(|item| item.id().as_str()).collect();
        assert_eq!(ids, vec!["Dell_5420", "Dell_7010", "Lenovo_T14 Gen 4"]);
        assert_eq!(items[2].display_name(), "Lenovo T14 Gen 4");
    }

    #[test]
    fn search_blob_is_lowercased_concatenation() {
        let items = parse(json!({
            "HP": {"ZBook": {
                "cpu": "Intel Core i7",
                "gpu": "NVIDIA RTX A1000",
                "power_pn": "PN-123",
                "modem_pn": "FM350",
                "type": "Mobile Workstation"
            }}
        }));
        assert_eq!(
            items[0].search_blob(),
            "hp zbook intel core i7 nvidia rtx a1000 pn-123 fm350 mobile workstation"
        );
    }

    #[test]
    fn tolerates_wrong_field_shapes() {
        let items = parse(json!({
            "Dell": {"5420": {
                "ram_slots": 2,
                "weight": null,
                "has_wwan": "yes",
                "has_esim": true,
                "gpu": {"nested": true},
                "pdf_links": "not-a-list",
                "wwan_modules": [
                    {"module": "DW5931e", "part_number": "0ABC", "esim": "Yes"},
                    "garbage"
                ]
            }}
        }));
        let spec = items[0].spec();
        assert_eq!(spec.ram_slots.as_deref(), Some("2"));
        assert_eq!(spec.weight, None);
        assert!(!spec.has_wwan);
        assert!(spec.has_esim);
        assert_eq!(spec.gpu, None);
        assert!(spec.pdf_links.is_empty());
        assert_eq!(spec.wwan_modules.len(), 1);
        assert_eq!(spec.wwan_modules[0].module.as_deref(), Some("DW5931e"));
    }

    #[test]
    fn module_rows_accept_table_headings() {
        let items = parse(json!({
            "Dell": {"5420": {"wwan_modules": [
                {"Module": "DW5825e", "P/N": "0X1Y", "eSIM": "No", "Tray P/N": "T-9"}
            ]}}
        }));
        let row = &items[0].spec().wwan_modules[0];
        assert_eq!(row.part_number.as_deref(), Some("0X1Y"));
        assert_eq!(row.tray_pn.as_deref(), Some("T-9"));
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(parse_catalog(b"[1, 2, 3]").is_err());
        assert!(parse_catalog(br#"{"Dell": {"5420": "just text"}}"#).is_err());
        assert!(parse_catalog(b"{not json").is_err());
    }

    #[test]
    fn parsing_is_deterministic() {
        let raw = json!({"B": {"x": {"cpu": "a"}}, "A": {"y": {"cpu": "b"}}}).to_string();
        assert_eq!(
            parse_catalog(raw.as_bytes()).unwrap(),
            parse_catalog(raw.as_bytes()).unwrap()
        );
    }
}
