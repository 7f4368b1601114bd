//! Command-line front end for the hardware catalog.
//!
//! Usage:
//!   hwcatalog list --brand Dell --feature wwan --search rtx
//!   hwcatalog show "Dell_Latitude 5420"
//!   hwcatalog facets --json
//!
//! The catalog path comes from `--db`, then `HWCATALOG_DB`, then
//! `hardware_db.json` in the working directory.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hwcatalog::{
    CatalogCache, CatalogIndex, Criteria, DetailView, ENV_CATALOG_PATH, Feature, ItemId,
    Selection, SpecRecord, View, resolve_catalog_path, split_list,
};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const ENV_LOG_JSON: &str = "HWCATALOG_LOG_JSON";
const EMPTY_CATALOG_HINT: &str = "Database is empty. Add models to the catalog document first.";

#[derive(Parser, Debug)]
#[command(name = "hwcatalog")]
#[command(about = "Search and inspect the hardware specification catalog")]
struct Cli {
    /// Catalog document path (falls back to HWCATALOG_DB, then hardware_db.json).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List models matching the given filters.
    List(ListArgs),
    /// Show the full specification of one model by id (`Brand_Model`).
    Show {
        id: String,
        /// Print the raw item as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the brands and device types available for filtering.
    Facets {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Manufacturer; repeat or comma-separate for several.
    #[arg(long = "brand")]
    brands: Vec<String>,
    /// Device type; repeat or comma-separate for several.
    #[arg(long = "type")]
    types: Vec<String>,
    /// Required feature: wwan, esim, gpu, ram (or the full label).
    #[arg(long = "feature")]
    features: Vec<String>,
    /// Case-insensitive text search over brand, model, CPU, GPU, part numbers and type.
    #[arg(long)]
    search: Option<String>,
    /// Print matching items as a JSON array.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn criteria(&self) -> Result<Criteria> {
        let mut criteria = Criteria::new();
        for brand in self.brands.iter().flat_map(|raw| split_list(raw)) {
            criteria = criteria.brand(brand);
        }
        for device_type in self.types.iter().flat_map(|raw| split_list(raw)) {
            criteria = criteria.device_type(device_type);
        }
        for raw in self.features.iter().flat_map(|raw| split_list(raw)) {
            criteria = criteria.feature(Feature::try_from(raw.as_str())?);
        }
        if let Some(text) = &self.search {
            criteria = criteria.search(text.as_str());
        }
        Ok(criteria)
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if env_flag(ENV_LOG_JSON) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref().map(str::trim),
        Ok("1" | "true" | "yes")
    )
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = resolve_catalog_path(cli.db, env::var(ENV_CATALOG_PATH).ok());
    let mut cache = CatalogCache::new();
    let index = cache.get(&path);

    match cli.command {
        Command::List(args) => list(&index, &args),
        Command::Show { id, json } => show(&index, ItemId(id), json),
        Command::Facets { json } => facets(&index, json),
    }
}

fn list(index: &CatalogIndex, args: &ListArgs) -> Result<()> {
    let criteria = args.criteria()?;
    if args.json {
        let items = hwcatalog::query(index.items(), &criteria);
        println!(
            "{}",
            serde_json::to_string_pretty(&items).context("serializing items")?
        );
        return Ok(());
    }

    if index.is_empty() {
        println!("{EMPTY_CATALOG_HINT}");
        return Ok(());
    }

    let View::Grid { cards } = Selection::none().resolve(index, &criteria) else {
        bail!("unexpected view for an empty selection");
    };
    println!("Found {} models matching your criteria", cards.len());
    if cards.is_empty() {
        println!("No models match the current filters.");
    }
    for card in cards {
        let mut line = format!(
            "{}  {}  CPU: {}  RAM: {} Max {}",
            card.id,
            card.title,
            card.cpu_preview,
            card.ram_status.dot(),
            card.ram_max
        );
        if !card.badges.is_empty() {
            line.push_str("  ");
            line.push_str(&card.badges.join(" | "));
        }
        println!("{line}");
    }
    Ok(())
}

fn show(index: &CatalogIndex, id: ItemId, as_json: bool) -> Result<()> {
    let mut selection = Selection::none();
    selection.select(id);
    match selection.resolve(index, &Criteria::new()) {
        View::Detail(detail) if as_json => {
            println!(
                "{}",
                serde_json::to_string_pretty(detail.item).context("serializing item")?
            );
            Ok(())
        }
        View::Detail(detail) => {
            print_detail(&detail);
            Ok(())
        }
        View::NotFound(id) => bail!("Model not found in database: {id}"),
        View::Grid { .. } => bail!("no model selected"),
    }
}

fn print_detail(detail: &DetailView<'_>) {
    let item = detail.item;
    let spec = item.spec();
    let field = |value: &Option<String>| SpecRecord::text(value).to_string();

    println!("{}", item.display_name());
    if let Some(sub_model) = SpecRecord::non_empty(&spec.sub_model) {
        println!("{sub_model}");
    }
    let badges: Vec<String> = detail
        .badges
        .iter()
        .map(|badge| format!("[{} {}]", badge.glyph, badge.label))
        .collect();
    println!("{}", badges.join(" "));
    if let Some(os) = SpecRecord::non_empty(&spec.support_os) {
        println!("OS Support: {os}");
    }

    println!("\nHARDWARE");
    println!("  CPU: {}", field(&spec.cpu));
    if let Some(gpu) = SpecRecord::non_empty(&spec.gpu) {
        println!("  GPU: {gpu}");
    }
    println!("  RAM: {} ({})", field(&spec.ram_max), field(&spec.ram_type));
    println!(
        "  Status: {} {} | Slots: {}",
        detail.ram_status.dot(),
        detail.ram_status.label(),
        field(&spec.ram_slots)
    );
    println!("  Storage: {}", field(&spec.storage_slots));
    if let Some(tpm) = SpecRecord::non_empty(&spec.security_tpm) {
        println!("  Security: {tpm}");
    }

    println!("\nDISPLAY & BODY");
    for (label, value) in [
        ("Screen", &spec.screen_options),
        ("Cam", &spec.webcam),
        ("Bio", &spec.biometrics),
        ("Weight", &spec.weight),
    ] {
        if let Some(value) = SpecRecord::non_empty(value) {
            println!("  {label}: {value}");
        }
    }
    if let Some(ports) = &detail.ports {
        println!("  Ports: {ports}");
    }

    println!("\nCONNECTIVITY");
    if let Some(wifi) = SpecRecord::non_empty(&spec.wifi_bt) {
        println!("  WiFi: {wifi}");
    }
    println!("  WWAN: {}", if spec.has_wwan { "Yes" } else { "No" });
    println!("  SIM: {}", detail.sim);
    if let Some(modem) = detail.modem_pn {
        println!("  Modem P/N: {modem}");
    }
    for warning in &detail.warnings {
        println!("  ! {warning}");
    }

    println!("\nPOWER");
    println!(
        "  Adapter: {} ({})",
        field(&spec.power_watts),
        field(&spec.power_connector)
    );
    if let Some(pn) = SpecRecord::non_empty(&spec.power_pn) {
        println!("  P/N: {pn}");
    }
    println!("  Battery: {}", field(&spec.battery_info));

    if !spec.wwan_modules.is_empty() {
        println!("\nCOMPATIBLE MODULES");
        for row in &spec.wwan_modules {
            println!(
                "  {} | P/N {} | eSIM {} | Tray {}",
                field(&row.module),
                field(&row.part_number),
                field(&row.esim),
                field(&row.tray_pn)
            );
        }
    }
    if let Some(notes) = SpecRecord::non_empty(&spec.expert_notes) {
        println!("\nCONSULTANT NOTES\n  {notes}");
    }
    if !spec.pdf_links.is_empty() {
        println!("\nDOCUMENTATION");
        for link in &spec.pdf_links {
            println!("  - {link}");
        }
    }
}

fn facets(index: &CatalogIndex, as_json: bool) -> Result<()> {
    let brands = index.brands();
    let types = index.types();
    if as_json {
        let value = json!({ "brands": brands, "types": types });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    println!("Brands: {}", brands.join(", "));
    println!("Types: {}", types.join(", "));
    println!(
        "Features: {}",
        Feature::ALL
            .iter()
            .map(|feature| format!("{} ({})", feature.short_name(), feature.label()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
