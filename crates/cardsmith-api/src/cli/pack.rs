//! Card-producing commands: unbox (pack draw) and forge.

use std::time::Duration;

use anyhow::Result;
use console::style;

use super::display::{card_table, plural, print_card_detail, print_skipped, spinner};
use crate::state::AppState;

/// Draw a pack, pause for the reveal, then show the new cards.
pub async fn unbox(state: &mut AppState, json: bool) -> Result<()> {
    let progress = if json { None } else { Some(spinner("Opening pack...")?) };

    let cards = match state.studio.draw_pack().await {
        Ok(cards) => cards,
        Err(e) => {
            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if let Some(progress) = progress {
        progress.set_message("Revealing...");
        tokio::time::sleep(Duration::from_millis(state.config.studio.reveal_delay_ms)).await;
        progress.finish_and_clear();
    }

    let refs: Vec<_> = cards.iter().collect();
    println!();
    println!(
        "  {} {} added to your collection",
        style("✦").magenta().bold(),
        style(plural(cards.len(), "card")).bold()
    );
    println!();
    println!("{}", card_table(&refs, None));
    println!();
    println!(
        "  {} now in the collection",
        style(plural(state.studio.store().len(), "card")).dim()
    );
    println!();

    Ok(())
}

/// Forge one card from a free-text description.
pub async fn forge(state: &mut AppState, description: &str, json: bool) -> Result<()> {
    if description.trim().is_empty() {
        print_skipped("Nothing to forge: the description is empty.", json);
        return Ok(());
    }

    let progress = if json { None } else { Some(spinner("Forging...")?) };
    let result = state.studio.forge(description).await;
    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }

    let card = match result {
        Ok(Some(card)) => card,
        Ok(None) => {
            print_skipped("Nothing to forge: the description is empty.", json);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    println!();
    println!("  {} Forged a new card", style("⚒").yellow().bold());
    print_card_detail(&card);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::offline_state;

    #[tokio::test]
    async fn test_blank_description_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = offline_state(dir.path()).await;
        let before = state.studio.store().len();

        // The gateway is unconfigured, so reaching it would be an error.
        forge(&mut state, " \t ", true).await.unwrap();
        forge(&mut state, "", false).await.unwrap();
        assert_eq!(state.studio.store().len(), before);
    }

    #[tokio::test]
    async fn test_forge_without_provider_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = offline_state(dir.path()).await;
        assert!(forge(&mut state, "a neon footer", true).await.is_err());
    }
}
