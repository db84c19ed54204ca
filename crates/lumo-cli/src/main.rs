//! Lumo CLI — entry point.
//!
//! # Commands
//!
//! - `lumo chat [-m MESSAGE]` — chat with the configured provider
//!   (single-shot or interactive REPL)
//! - `lumo status` — show the resolved provider configuration
//! - `lumo provider show|set|clear` — manage persisted provider settings

mod helpers;
mod provider_cmd;
mod repl;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lumo_core::SettingsStore;
use lumo_providers::{AiProvider, ServiceSelector};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✦ Lumo — terminal chat client for Google generative-AI endpoints
#[derive(Parser)]
#[command(name = "lumo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the configured provider (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show the resolved provider configuration
    Status,

    /// Manage the persisted provider settings
    Provider {
        #[command(subcommand)]
        action: provider_cmd::ProviderCommands,
    },
}

// ─────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let selector = ServiceSelector::new(SettingsStore::new(None));

    match cli.command {
        Commands::Chat { message, logs } => {
            init_logging(logs);
            match message {
                Some(msg) => {
                    let client = selector.select(None);
                    match client.generate(&msg).await {
                        Ok(text) => helpers::print_response(&text),
                        Err(e) => {
                            helpers::print_error(&e);
                            std::process::exit(1);
                        }
                    }
                }
                None => repl::run(&selector).await?,
            }
        }
        Commands::Status => {
            init_logging(false);
            status::run()?;
        }
        Commands::Provider { action } => {
            init_logging(false);
            provider_cmd::run(&selector, action).await?;
        }
    }

    Ok(())
}

/// Initialize tracing. `RUST_LOG` wins; `--logs` bumps the default to
/// debug, otherwise only warnings surface.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "lumo_cli=debug,lumo_core=debug,lumo_providers=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
