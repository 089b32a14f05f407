//! Secret management CLI commands: set, delete.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Password;

use cardsmith_core::service::secret::SecretService;
use cardsmith_types::error::RepositoryError;

use crate::state::AppState;

/// Set a secret value with hidden input prompt.
///
/// # Examples
///
/// ```bash
/// # Secure prompt (recommended)
/// csmith secret set GEMINI_API_KEY
///
/// # Script/automation mode
/// csmith secret set GEMINI_API_KEY --value AIza...
/// ```
pub async fn set_secret(
    state: &AppState,
    key: Option<&str>,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = key.unwrap_or_else(|| state.api_key_name());
    let secret_value = match value {
        Some(v) => v.to_string(),
        None => Password::new()
            .with_prompt(format!("Enter value for {}", style(key).bold()))
            .interact()?,
    };

    if secret_value.trim().is_empty() {
        anyhow::bail!("refusing to store an empty value for {key}");
    }

    let source = state
        .secret_service
        .set_secret(key, &secret_value)
        .await
        .with_context(|| format!("failed to store {key}"))?;

    let masked = SecretService::mask_secret(&secret_value);
    if json {
        println!(
            "{}",
            serde_json::json!({"set": true, "key": key, "source": source, "masked": masked})
        );
    } else {
        println!(
            "  {} Secret '{}' stored in the {} ({})",
            style("✓").green().bold(),
            style(key).bold(),
            source,
            masked
        );
        if key == state.api_key_name() && !state.gateway.is_configured() {
            println!(
                "  {}",
                style("The provider connects on the next command.").dim()
            );
        }
    }

    Ok(())
}

/// Remove a secret from every writable backend that holds it.
pub async fn delete_secret(state: &AppState, key: Option<&str>, json: bool) -> Result<()> {
    let key = key.unwrap_or_else(|| state.api_key_name());

    match state.secret_service.delete_secret(key).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            anyhow::bail!("no stored secret named {key}");
        }
        Err(e) => return Err(e).with_context(|| format!("failed to delete {key}")),
    }

    if json {
        println!("{}", serde_json::json!({"deleted": true, "key": key}));
    } else {
        println!(
            "  {} Secret '{}' deleted",
            style("✓").green().bold(),
            style(key).bold()
        );
    }

    Ok(())
}
