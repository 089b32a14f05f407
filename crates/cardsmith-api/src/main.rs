//! Cardsmith CLI entry point.
//!
//! Binary name: `csmith`
//!
//! Parses CLI arguments, initializes tracing, the database and services,
//! then dispatches to the appropriate command handler or starts the
//! interactive studio.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cardsmith_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};
use cardsmith_types::error::StudioError;
use cli::build::BuildArgs;
use cli::{Cli, Commands, SecretCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.json,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "csmith", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();

    if let Err(e) = &result {
        if let Some(studio_err) = e.downcast_ref::<StudioError>() {
            cli::display::print_failure(studio_err);
            std::process::exit(1);
        }
    }
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut state = AppState::init().await?;
    let json = cli.json;

    match cli.command {
        Commands::Library { filter } => {
            cli::collection::library(&state, filter, json)?;
        }

        Commands::Show { handle, preview } => {
            cli::collection::show(&state, &handle, preview.as_deref(), json).await?;
        }

        Commands::Stats => {
            cli::collection::stats(&state, json)?;
        }

        Commands::Unbox => {
            cli::pack::unbox(&mut state, json).await?;
        }

        Commands::Forge { description } => {
            cli::pack::forge(&mut state, &description.join(" "), json).await?;
        }

        Commands::Build {
            prompt,
            cards,
            previous,
            output,
        } => {
            let args = BuildArgs {
                prompt: &prompt,
                cards: &cards,
                previous: previous.as_deref(),
                output: output.as_deref(),
            };
            cli::build::build(&mut state, args, json).await?;
        }

        Commands::Studio => {
            cli::studio::loop_runner::run_studio_loop(&mut state).await?;
        }

        Commands::Secret { action } => match action {
            SecretCommand::Set { key, value } => {
                cli::secret::set_secret(&state, key.as_deref(), value.as_deref(), json).await?;
            }
            SecretCommand::Delete { key } => {
                cli::secret::delete_secret(&state, key.as_deref(), json).await?;
            }
        },

        Commands::Status => {
            cli::status::status(&state, json).await?;
        }

        // Generated before state init.
        Commands::Completions { .. } => {}
    }

    state.db_pool.close().await;
    Ok(())
}
