//! Welcome banner for studio sessions.

use console::style;

use super::super::display::plural;

/// Print the banner shown when a studio session starts.
pub fn print_welcome_banner(provider: Option<&str>, site_model: &str, collection_size: usize) {
    println!();
    println!("  {} {}", style("✦").magenta().bold(), style("Cardsmith Studio").cyan().bold());
    println!(
        "  {}",
        style(format!("{} in your collection", plural(collection_size, "card"))).dim()
    );
    println!();
    match provider {
        Some(name) => println!(
            "  {}  {} {}",
            style("Provider:").bold(),
            name,
            style(format!("({site_model})")).dim()
        ),
        None => println!(
            "  {}  {}",
            style("Provider:").bold(),
            style("not configured, generation is unavailable").yellow()
        ),
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, or describe a site to build it. Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
