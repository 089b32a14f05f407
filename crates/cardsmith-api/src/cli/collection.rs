//! Read-only collection commands: library, show, stats.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use cardsmith_core::card::library::{CollectionSummary, LibraryFilter, browse};
use cardsmith_core::card::preview::render_card_preview;
use cardsmith_core::service::fs::FileSystem;
use cardsmith_infra::filesystem::LocalFileSystem;

use super::display::{card_table, category_color, plural, print_card_detail, rarity_color};
use crate::state::AppState;

/// List cards matching `filter`, in collection order.
pub fn library(state: &AppState, filter: LibraryFilter, json: bool) -> Result<()> {
    let cards = browse(state.studio.store(), filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        let what = match filter {
            LibraryFilter::All => "cards".to_string(),
            LibraryFilter::Category(category) => format!("{category} cards"),
        };
        println!();
        println!(
            "  {} No {what} yet. Draw some with: {}",
            style("i").blue().bold(),
            style("csmith unbox").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", card_table(&cards, None));
    println!();
    println!(
        "  {} ({filter})",
        style(plural(cards.len(), "card")).bold()
    );
    println!();

    Ok(())
}

/// Show one card; optionally write its standalone preview page.
pub async fn show(state: &AppState, handle: &str, preview: Option<&Path>, json: bool) -> Result<()> {
    let card = state.studio.store().resolve_handle(handle)?;

    if let Some(path) = preview {
        LocalFileSystem::new()
            .write_file(path, &render_card_preview(card))
            .await
            .with_context(|| format!("failed to write preview to {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(card)?);
        return Ok(());
    }

    print_card_detail(card);
    if let Some(path) = preview {
        println!(
            "  {} Preview written to {}",
            style("✓").green().bold(),
            style(path.display()).dim()
        );
        println!();
    }

    Ok(())
}

/// Totals by category and rarity.
pub fn stats(state: &AppState, json: bool) -> Result<()> {
    let summary = CollectionSummary::of(state.studio.store().cards());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Group").fg(Color::White),
        Cell::new("Count").fg(Color::White),
    ]);

    for entry in &summary.categories {
        table.add_row(vec![
            Cell::new(entry.category.to_string()).fg(category_color(entry.category)),
            Cell::new(entry.count),
        ]);
    }
    for entry in &summary.rarities {
        table.add_row(vec![
            Cell::new(entry.rarity.to_string()).fg(rarity_color(entry.rarity)),
            Cell::new(entry.count),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} in the collection",
        style(plural(summary.total, "card")).bold()
    );
    println!();

    Ok(())
}
