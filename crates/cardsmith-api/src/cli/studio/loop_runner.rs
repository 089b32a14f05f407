//! Main studio loop.
//!
//! Reads lines, dispatches slash commands, and treats any other line as a
//! build prompt. A failed command is reported and the session continues.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use tracing::info;

use cardsmith_core::card::selection::ToggleOutcome;
use cardsmith_infra::filesystem::LocalFileSystem;
use cardsmith_types::error::StudioError;

use super::super::display::{plural, print_deck, print_failure, spinner};
use super::super::{collection, pack};
use super::banner::print_welcome_banner;
use super::commands::{self, StudioCommand};
use super::input::{InputEvent, StudioInput};
use crate::state::AppState;

enum Flow {
    Continue,
    Exit,
}

/// Run the interactive studio until `/exit` or Ctrl+D.
pub async fn run_studio_loop(state: &mut AppState) -> Result<()> {
    print_welcome_banner(
        state.gateway.provider_name(),
        &state.gateway.settings().site_model,
        state.studio.store().len(),
    );

    let (mut input, _writer) = StudioInput::new(prompt_for(state))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    info!("studio session started");

    loop {
        match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep going.").dim());
            }
            InputEvent::Line(text) if text.is_empty() => {}
            InputEvent::Line(text) => {
                let command = commands::parse(&text).unwrap_or(StudioCommand::Build(text));
                if let StudioCommand::Clear = command {
                    input.clear();
                    continue;
                }
                match dispatch(state, command).await {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => report(&e),
                }
                input.update_prompt(&prompt_for(state));
            }
        }
    }

    input.flush();
    println!("\n  {}", style("Session ended.").dim());
    info!("studio session ended");
    Ok(())
}

async fn dispatch(state: &mut AppState, command: StudioCommand) -> Result<Flow> {
    match command {
        StudioCommand::Help => commands::print_help(),
        StudioCommand::Library(filter) => collection::library(state, filter, false)?,
        StudioCommand::Show(handle) => collection::show(state, &handle, None, false).await?,
        StudioCommand::Toggle(handle) => toggle(state, &handle)?,
        StudioCommand::Deck => print_deck(state.studio.selection(), state.studio.store()),
        StudioCommand::ClearStack => {
            state.studio.selection_mut().clear_structural();
            note("Stack cleared");
        }
        StudioCommand::ClearTheme => {
            state.studio.selection_mut().clear_theme();
            note("Theme cleared");
        }
        StudioCommand::DropVoice(handle) => {
            let id = state.studio.store().resolve_handle(&handle)?.id;
            state.studio.selection_mut().remove_voice(&id);
            note("Voice dropped");
        }
        StudioCommand::Unbox => pack::unbox(state, false).await?,
        StudioCommand::Forge(description) => pack::forge(state, &description, false).await?,
        StudioCommand::Build(prompt) => build(state, &prompt).await?,
        StudioCommand::Fresh => {
            state.studio.reset_artifact();
            note("The next build starts from scratch");
        }
        StudioCommand::Export(path) => {
            let path = path.map_or_else(
                || PathBuf::from(&state.config.studio.export_file),
                PathBuf::from,
            );
            state.studio.export_artifact(&LocalFileSystem::new(), &path).await?;
            note(&format!("Exported to {}", path.display()));
        }
        StudioCommand::Clear => {}
        StudioCommand::Exit => return Ok(Flow::Exit),
        StudioCommand::Unknown(name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
    }
    Ok(Flow::Continue)
}

fn toggle(state: &mut AppState, handle: &str) -> Result<()> {
    let card = state.studio.store().resolve_handle(handle)?;
    let (id, name) = (card.id, card.name.clone());

    match state.studio.toggle(&id) {
        Some(ToggleOutcome::Selected) => note(&format!("Selected {name}")),
        Some(ToggleOutcome::Deselected) => note(&format!("Deselected {name}")),
        Some(ToggleOutcome::Rejected) => println!(
            "\n  {} The stack is full. Clear it or deselect a UI card first.\n",
            style("!").yellow().bold()
        ),
        None => anyhow::bail!("no card matches '{handle}'"),
    }
    Ok(())
}

async fn build(state: &mut AppState, prompt: &str) -> Result<()> {
    let iterating = state.studio.artifact().is_some();
    let progress = spinner(if iterating { "Rebuilding..." } else { "Building site..." })?;
    let result = state.studio.build(prompt).await;
    progress.finish_and_clear();

    if let Some(artifact) = result? {
        println!(
            "\n  {} Site {} ({} bytes). /export to save it.\n",
            style("✓").green().bold(),
            if iterating { "updated" } else { "built" },
            artifact.len()
        );
    }
    Ok(())
}

fn note(message: &str) {
    println!("\n  {} {message}\n", style("•").cyan());
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<StudioError>() {
        Some(studio_err) => print_failure(studio_err),
        None => eprintln!("\n  {} {err:#}\n", style("!").red().bold()),
    }
}

fn prompt_for(state: &AppState) -> String {
    let selected = state.studio.selection().len();
    let tag = if selected == 0 {
        String::new()
    } else {
        format!("{} ", style(format!("[{}]", plural(selected, "card"))).dim())
    };
    format!("  {tag}{} ", style("studio >").green().bold())
}
