//! One-shot site build: select cards, assemble, export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use cardsmith_core::card::selection::ToggleOutcome;
use cardsmith_core::service::fs::FileSystem;
use cardsmith_infra::filesystem::LocalFileSystem;
use cardsmith_types::generation::Artifact;

use super::display::{plural, print_deck, print_skipped, spinner};
use crate::state::AppState;

pub struct BuildArgs<'a> {
    pub prompt: &'a str,
    /// Card handles, toggled in this order.
    pub cards: &'a [String],
    pub previous: Option<&'a Path>,
    pub output: Option<&'a Path>,
}

/// Toggle `args.cards` into a fresh selection, build, and write the result.
pub async fn build(state: &mut AppState, args: BuildArgs<'_>, json: bool) -> Result<()> {
    if args.prompt.trim().is_empty() {
        print_skipped("Nothing to build: the prompt is empty.", json);
        return Ok(());
    }

    let fs = LocalFileSystem::new();

    for handle in args.cards {
        let id = state.studio.store().resolve_handle(handle)?.id;
        match state.studio.toggle(&id) {
            Some(ToggleOutcome::Rejected) => {
                tracing::warn!(card = %id, "structural stack full, card skipped");
                if !json {
                    println!(
                        "  {} Stack is full, skipping {}",
                        style("!").yellow().bold(),
                        style(handle).dim()
                    );
                }
            }
            Some(ToggleOutcome::Deselected) => {
                tracing::warn!(card = %id, "card listed twice, deselected");
            }
            Some(ToggleOutcome::Selected) | None => {}
        }
    }

    if let Some(path) = args.previous {
        let html = fs
            .read_file(path)
            .await
            .with_context(|| format!("failed to read previous build {}", path.display()))?;
        state.studio.set_previous_artifact(Artifact::new(html));
    }

    if !json {
        print_deck(state.studio.selection(), state.studio.store());
    }

    let progress = if json { None } else { Some(spinner("Building site...")?) };
    let result = state.studio.build(args.prompt).await;
    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }
    let Some(bytes) = result?.map(|artifact| artifact.len()) else {
        print_skipped("Nothing to build: the prompt is empty.", json);
        return Ok(());
    };

    let output = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&state.config.studio.export_file));
    state.studio.export_artifact(&fs, &output).await?;

    if json {
        let active: Vec<String> = state
            .studio
            .active_cards()
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        let report = serde_json::json!({
            "output": output.display().to_string(),
            "bytes": bytes,
            "cards": active,
            "iterated": args.previous.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "  {} Built from {} ({} bytes) -> {}",
        style("✓").green().bold(),
        plural(state.studio.selection().len(), "card"),
        bytes,
        style(output.display()).cyan()
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::offline_state;

    #[tokio::test]
    async fn test_blank_prompt_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = offline_state(dir.path()).await;
        let output = dir.path().join("site.html");

        let args = BuildArgs {
            prompt: "  \n ",
            cards: &[],
            previous: None,
            output: Some(&output),
        };
        build(&mut state, args, true).await.unwrap();

        assert!(state.studio.artifact().is_none());
        assert!(!output.exists());
    }
}
