//! View command handler.

use super::{exit_codes, open_store, OutputFormat};
use crate::config::AppConfig;
use crate::model::{Component, Engine};
use crate::store::FleetStore;
use anyhow::Result;
use std::fmt::Write as _;

/// Run the view command: print one engine's product tree with node ids,
/// so operators can identify swap targets.
pub fn run_view(config: &AppConfig, engine_id: u64, format: OutputFormat) -> Result<i32> {
    let store = open_store(config)?;
    let engine = store.load_engine(engine_id)?;

    match format {
        OutputFormat::Summary => println!("{}", render_tree(&engine)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&engine)?),
    }
    Ok(exit_codes::SUCCESS)
}

fn render_tree(engine: &Engine) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "{} (engine {}) — {:.1} h, {} cycles, {}",
        engine.name, engine.id, engine.total_hours, engine.total_cycles, engine.status
    )?;

    if engine.components.is_empty() {
        writeln!(out, "  (no components imported yet)")?;
        return Ok(out);
    }

    for root in &engine.components.roots {
        render_node(&mut out, root, 1)?;
    }
    Ok(out)
}

fn render_node(out: &mut String, node: &Component, depth: usize) -> Result<()> {
    let life = if node.is_life_limited() {
        format!(", life {:.0}/{:.0}", node.current_hours, node.life_limit)
    } else {
        String::new()
    };
    writeln!(
        out,
        "{}#{} {} [{} / {}]{life}",
        "  ".repeat(depth),
        node.id,
        node.description,
        node.part_number,
        node.serial_number,
    )?;
    for child in &node.children {
        render_node(out, child, depth + 1)?;
    }
    Ok(())
}
