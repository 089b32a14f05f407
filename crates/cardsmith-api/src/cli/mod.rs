//! CLI command definitions for the `csmith` binary.
//!
//! Uses clap derive macros. Collection commands are read-only; `unbox`,
//! `forge` and `build` call the generation provider.

pub mod build;
pub mod collection;
pub mod display;
pub mod pack;
pub mod secret;
pub mod status;
pub mod studio;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use cardsmith_core::card::library::LibraryFilter;

/// Collect UI component cards and assemble them into websites.
#[derive(Parser)]
#[command(name = "csmith", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the card collection.
    #[command(alias = "ls")]
    Library {
        /// all, ui, theme or voice.
        #[arg(long, short, default_value = "all")]
        filter: LibraryFilter,
    },

    /// Show one card in detail.
    Show {
        /// Card id or the short handle shown by `library`.
        handle: String,

        /// Also write a standalone HTML preview of the card to this file.
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Collection totals by category and rarity.
    Stats,

    /// Draw a pack of new cards.
    Unbox,

    /// Forge a single card from a description.
    Forge {
        /// What the card should be, e.g. "a neon pricing table".
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Build a website from selected cards.
    Build {
        /// What the site should be.
        #[arg(long, short)]
        prompt: String,

        /// Card to select, in order. Repeat for more cards.
        #[arg(long = "card", short = 'c')]
        cards: Vec<String>,

        /// A previous build to iterate on.
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Where to write the result (defaults to the configured export file).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Interactive studio: browse, select, generate and export in one session.
    Studio,

    /// Manage the provider API key.
    Secret {
        #[command(subcommand)]
        action: SecretCommand,
    },

    /// Provider, collection and key status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SecretCommand {
    /// Store a secret in the OS keychain.
    Set {
        /// Secret name (defaults to the configured API key name).
        key: Option<String>,

        /// Value to store; prompts with hidden input when omitted.
        #[arg(long)]
        value: Option<String>,
    },

    /// Remove a secret from the OS keychain.
    #[command(alias = "rm")]
    Delete {
        /// Secret name (defaults to the configured API key name).
        key: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_types::card::Category;

    #[test]
    fn test_cli_is_well_formed() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_library_filter() {
        let cli = Cli::try_parse_from(["csmith", "library", "--filter", "voice"]).unwrap();
        match cli.command {
            Commands::Library { filter } => {
                assert_eq!(filter, LibraryFilter::Category(Category::Voice));
            }
            _ => panic!("expected library"),
        }
    }

    #[test]
    fn test_parse_build_keeps_card_order() {
        let cli = Cli::try_parse_from([
            "csmith", "build", "-p", "a bakery", "-c", "aa11", "--card", "bb22", "-c", "cc33",
        ])
        .unwrap();
        match cli.command {
            Commands::Build { prompt, cards, previous, output } => {
                assert_eq!(prompt, "a bakery");
                assert_eq!(cards, ["aa11", "bb22", "cc33"]);
                assert!(previous.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_forge_collects_words() {
        let cli = Cli::try_parse_from(["csmith", "forge", "a", "glowing", "footer"]).unwrap();
        match cli.command {
            Commands::Forge { description } => assert_eq!(description.join(" "), "a glowing footer"),
            _ => panic!("expected forge"),
        }
    }

    #[test]
    fn test_forge_requires_description() {
        assert!(Cli::try_parse_from(["csmith", "forge"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["csmith", "stats", "--json", "-vv", "--otel"]).unwrap();
        assert!(cli.json);
        assert!(cli.otel);
        assert_eq!(cli.verbose, 2);
    }
}
