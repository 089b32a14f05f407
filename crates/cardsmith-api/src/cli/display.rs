//! Shared terminal rendering for cards: tables, detail views, spinners.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use cardsmith_core::card::selection::SelectionState;
use cardsmith_core::card::store::CardStore;
use cardsmith_core::storage::blob_store::BlobStore;
use cardsmith_types::card::{Card, CardId, Category, Rarity};
use cardsmith_types::error::{GenerationError, StudioError};

pub fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Grey,
        Rarity::Uncommon => Color::Green,
        Rarity::Rare => Color::Blue,
        Rarity::Legendary => Color::Magenta,
        Rarity::Ancient => Color::Yellow,
    }
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Ui => Color::Cyan,
        Category::Theme => Color::Magenta,
        Category::Voice => Color::Yellow,
    }
}

/// A table of cards. With a selection, an extra column marks active cards.
pub fn card_table(cards: &[&Card], selection: Option<&SelectionState>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Rarity").fg(Color::White),
        Cell::new("Style").fg(Color::White),
    ];
    if selection.is_some() {
        header.insert(0, Cell::new(""));
    }
    table.set_header(header);

    for card in cards {
        let mut row = vec![
            Cell::new(card.id.short()).fg(Color::DarkGrey),
            Cell::new(&card.name).fg(Color::White),
            Cell::new(card.category.to_string()).fg(category_color(card.category)),
            Cell::new(card.rarity.to_string()).fg(rarity_color(card.rarity)),
            Cell::new(truncate(&card.visual_style, 40)),
        ];
        if let Some(selection) = selection {
            let mark = if selection.is_selected(&card.id) { "●" } else { "" };
            row.insert(0, Cell::new(mark).fg(Color::Green));
        }
        table.add_row(row);
    }

    table
}

/// Print a single card with its code fragments.
pub fn print_card_detail(card: &Card) {
    println!();
    println!(
        "  {} {}",
        style(&card.name).cyan().bold(),
        style(format!("[{}]", card.id.short())).dim()
    );
    println!("  {}", style(&card.description).dim());
    println!();
    println!("  {}  {}", style("Category:").bold(), card.category);
    println!("  {}    {}", style("Rarity:").bold(), card.rarity);
    println!("  {}     {}", style("Style:").bold(), card.visual_style);
    if !card.tech_stack.is_empty() {
        println!("  {}     {}", style("Stack:").bold(), card.tech_stack.join(", "));
    }
    println!("  {}        {}", style("ID:").bold(), style(card.id).dim());
    println!();

    match card.voice_directive() {
        Some(directive) => {
            println!("  {}", style("── Directive ──").dim());
            println!("  {directive}");
            println!();
        }
        None => {
            print_fragment("HTML", &card.code.structure);
            print_fragment("CSS", &card.code.presentation);
            print_fragment("JS", &card.code.behavior);
        }
    }
}

fn print_fragment(label: &str, code: &str) {
    if code.trim().is_empty() {
        return;
    }
    println!("  {}", style(format!("── {label} ──")).dim());
    for line in code.lines() {
        println!("    {line}");
    }
    println!();
}

/// The active selection, grouped by slot.
pub fn print_deck<B: BlobStore>(selection: &SelectionState, store: &CardStore<B>) {
    let name = |id: &CardId| card_name(store, id);

    println!();
    println!(
        "  {} {}/{}",
        style("Stack:").bold(),
        selection.structural().len(),
        cardsmith_core::card::selection::MAX_STRUCTURAL
    );
    for id in selection.structural() {
        println!("    {} {} {}", style("•").cyan(), name(id), style(id.short()).dim());
    }
    match selection.theme() {
        Some(id) => println!(
            "  {}  {} {}",
            style("Theme:").bold(),
            name(id),
            style(id.short()).dim()
        ),
        None => println!("  {}  {}", style("Theme:").bold(), style("none").dim()),
    }
    println!("  {}  {}", style("Voice:").bold(), selection.voice().len());
    for id in selection.voice() {
        println!("    {} {} {}", style("•").yellow(), name(id), style(id.short()).dim());
    }
    println!();
}

fn card_name<'a, B: BlobStore>(store: &'a CardStore<B>, id: &CardId) -> &'a str {
    store.get(id).map_or("(missing)", |c| c.name.as_str())
}

/// A steady-ticking spinner with a message.
pub fn spinner(message: impl Into<String>) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Report a guarded no-op, e.g. a blank prompt. Not an error.
pub fn print_skipped(reason: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({"skipped": true, "reason": reason}));
    } else {
        println!();
        println!("  {}", style(reason).dim());
        println!();
    }
}

/// Print a failed studio operation with a hint about what to do next.
pub fn print_failure(err: &StudioError) {
    eprintln!();
    eprintln!("  {} {err}", style("✗").red().bold());
    if let Some(hint) = failure_hint(err) {
        eprintln!("  {}", style(hint).dim());
    }
    eprintln!();
}

fn failure_hint(err: &StudioError) -> Option<&'static str> {
    match err {
        StudioError::Generation(GenerationError::Configuration(_)) => {
            Some("Set the API key with `csmith secret set` or in the environment.")
        }
        StudioError::Generation(GenerationError::Busy) => {
            Some("Another generation is still running; wait for it to finish.")
        }
        StudioError::Generation(e) if e.is_service_error() => {
            Some("The generation service failed and nothing was changed. Try again.")
        }
        StudioError::Store(_) => Some("The collection was not changed."),
        _ => None,
    }
}

/// Shorten `text` to at most `max` characters, ending in an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// `"1 card"`, `"3 cards"`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is far too long", 8), "this is…");
    }

    #[test]
    fn test_failure_hints() {
        let config = StudioError::from(GenerationError::Configuration("no key".to_string()));
        assert!(failure_hint(&config).unwrap().contains("secret set"));

        let malformed = StudioError::from(GenerationError::MalformedResponse("bad".to_string()));
        assert!(failure_hint(&malformed).unwrap().contains("Try again"));

        let busy = StudioError::from(GenerationError::Busy);
        assert!(failure_hint(&busy).unwrap().contains("still running"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "card"), "1 card");
        assert_eq!(plural(0, "card"), "0 cards");
        assert_eq!(plural(5, "card"), "5 cards");
    }
}
