//! System status dashboard command.

use anyhow::Result;
use console::style;

use cardsmith_core::card::library::CollectionSummary;
use cardsmith_core::service::secret::SecretService;

use super::display::plural;
use crate::state::AppState;

/// Display provider, key and collection status.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let provider = &state.config.provider;
    let settings = state.gateway.settings();
    let summary = CollectionSummary::of(state.studio.store().cards());

    let key = match state.secret_service.resolve(state.api_key_name()).await {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::warn!(key = %state.api_key_name(), error = %e, "failed to look up API key");
            None
        }
    };

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "provider": {
                "type": provider.provider_type,
                "name": state.gateway.provider_name(),
                "configured": state.gateway.is_configured(),
                "card_model": settings.card_model,
                "site_model": settings.site_model,
                "status": state.gateway.status(),
            },
            "api_key": {
                "name": state.api_key_name(),
                "source": key.as_ref().map(|k| k.source),
            },
            "collection": summary,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Cardsmith v{}",
        style("✦").magenta().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Provider ──").dim());
    match state.gateway.provider_name() {
        Some(name) => println!("  Backend:    {} ({})", style(name).bold(), provider.provider_type),
        None => println!(
            "  Backend:    {} ({})",
            style("not configured").yellow(),
            provider.provider_type
        ),
    }
    println!("  Card model: {}", settings.card_model);
    println!("  Site model: {}", settings.site_model);
    match &key {
        Some(resolved) => println!(
            "  API key:    {} {} from {}",
            style(state.api_key_name()).bold(),
            style(SecretService::mask_secret(&resolved.value)).dim(),
            resolved.source
        ),
        None => println!(
            "  API key:    {} {}",
            style(state.api_key_name()).bold(),
            style("missing").red()
        ),
    }
    println!();

    println!("  {}", style("── Collection ──").dim());
    println!("  Total:  {}", style(plural(summary.total, "card")).bold());
    for entry in &summary.categories {
        println!("  {:<7} {}", format!("{}:", entry.category), entry.count);
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!("  Export:   {}", style(&state.config.studio.export_file).dim());
    println!();

    Ok(())
}
