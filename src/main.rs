//! Asciicrawl - Entry Point
//!
//! Generates a level, scatters items over it, walks the player across
//! every placement and prints the result.

use anyhow::{Context, Result};

use asciicrawl::config::GameConfig;
use asciicrawl::data::{export_default_catalog, load_catalog_or_builtin};
use asciicrawl::game::MapSession;
use asciicrawl::items::EquipSlot;
use asciicrawl::ui::{describe_item, render_inventory};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Asciicrawl v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load();

    if std::env::args().any(|a| a == "--export-items") {
        let path = export_default_catalog(&config.data_dir).context("exporting built-in items")?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let catalog = load_catalog_or_builtin(&config.data_dir);
    let mut session = MapSession::new(config, catalog, None);

    let report = session.generate_level()?;
    if !report.is_consistent() {
        log::warn!("{} placements could not be drawn", report.drifted.len());
    }

    println!("{}", session.map().to_text());

    let spots: Vec<_> = session.registry().iter().map(|p| p.position()).collect();
    for pos in spots {
        if !session.move_player(pos) {
            continue;
        }
        if let Some(picked) = session.pickup()? {
            match session.equip(&picked.item) {
                Ok(slot) => log::debug!("{} -> {}", picked.item.name, slot),
                Err(e) => log::debug!("{} stays in the pack: {}", picked.item.name, e),
            }
        }
    }

    println!();
    println!("{}", session.map().to_text());
    println!();
    println!("Inventory: {}", render_inventory(session.player()));
    println!("Equipment:");
    for slot in EquipSlot::all() {
        let line = session.player().equipment.get(slot).map_or_else(|| "-".to_string(), describe_item);
        println!("  {:<12} {}", slot.to_string(), line);
    }
    println!("Defense: {}", session.player().equipment.total_defense());

    log::info!("Asciicrawl finished");
    Ok(())
}
