//! Administrative command handlers: engine and inventory management.

use super::{exit_codes, open_store, OutputFormat};
use crate::config::AppConfig;
use crate::model::InventoryItem;
use crate::store::FleetStore;
use anyhow::Result;

/// Create a new engine with an empty tree.
pub fn run_engine_add(config: &AppConfig, name: &str) -> Result<i32> {
    let store = open_store(config)?;
    let engine = store.create_engine(name)?;
    println!("created engine {} ({})", engine.id, engine.name);
    Ok(exit_codes::SUCCESS)
}

/// List all engines with their tree sizes.
pub fn run_engine_list(config: &AppConfig, format: OutputFormat) -> Result<i32> {
    let store = open_store(config)?;
    let engines = store.list_engines()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&engines)?),
        OutputFormat::Summary => {
            for engine in &engines {
                println!(
                    "{:>4}  {}  {:.1} h  {} component(s)  {}",
                    engine.id,
                    engine.name,
                    engine.total_hours,
                    engine.components.node_count(),
                    engine.status
                );
            }
            if engines.is_empty() {
                println!("no engines yet; add one with `fleetbom engine add <name>`");
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Add a warehouse item to the inventory ledger.
pub fn run_inventory_add(
    config: &AppConfig,
    description: &str,
    part_number: &str,
    serial_number: &str,
    location: &str,
    life_limit: f64,
) -> Result<i32> {
    let store = open_store(config)?;
    let ledger = store.load_ledger()?;
    let item = store.add_inventory_item(InventoryItem {
        id: ledger.next_id(),
        description: description.to_string(),
        part_number: part_number.to_string(),
        serial_number: serial_number.to_string(),
        location: location.to_string(),
        current_hours: 0.0,
        life_limit,
    })?;
    println!("added inventory item {} ({})", item.id, item.serial_number);
    Ok(exit_codes::SUCCESS)
}

/// List the inventory ledger.
pub fn run_inventory_list(config: &AppConfig, format: OutputFormat) -> Result<i32> {
    let store = open_store(config)?;
    let ledger = store.load_ledger()?;

    match format {
        OutputFormat::Json => {
            let items: Vec<&InventoryItem> = ledger.iter().collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Summary => {
            for item in ledger.iter() {
                println!(
                    "{:>4}  {}  [{} / {}]  {}  {}",
                    item.id,
                    item.description,
                    item.part_number,
                    item.serial_number,
                    item.location,
                    if item.life_limit > 0.0 {
                        format!("life {:.0}", item.life_limit)
                    } else {
                        "no life limit".to_string()
                    }
                );
            }
            if ledger.is_empty() {
                println!("inventory ledger is empty");
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}
