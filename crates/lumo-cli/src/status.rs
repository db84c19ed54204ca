//! `lumo status` — show the resolved provider configuration.

use anyhow::Result;
use colored::Colorize;

use lumo_core::config::{load_config, AuthMode, Provider};
use lumo_core::SettingsStore;

use crate::helpers;

/// Run the status command.
pub fn run() -> Result<()> {
    let store = SettingsStore::new(None);
    let persisted = store.get();
    let source = if persisted.is_some() {
        "persisted settings"
    } else {
        "environment defaults"
    };
    let config = persisted.unwrap_or_else(|| load_config(None).provider);

    println!();
    println!("{}", "✦ Lumo Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Settings:".bold(),
        store.path().display(),
        if store.path().exists() {
            "✓".green().to_string()
        } else {
            "(not found)".dimmed().to_string()
        }
    );
    println!("  {:<18} {}", "Source:".bold(), source);
    println!("  {:<18} {}", "Provider:".bold(), config.provider.label());

    let auth = match config.auth_mode {
        AuthMode::ApiKey => format!("API key {}", helpers::mask_secret(&config.api_key)),
        AuthMode::ServiceAccount => format!(
            "service account {}",
            if config.service_account_path.is_empty() {
                "(not set)".to_string()
            } else {
                config.service_account_path.clone()
            }
        ),
    };
    println!("  {:<18} {}", "Auth:".bold(), auth);

    if config.provider == Provider::VertexAi {
        println!(
            "  {:<18} {} ({})",
            "Project:".bold(),
            if config.project_id.is_empty() {
                "(not set)".to_string()
            } else {
                config.project_id.clone()
            },
            config.location
        );
    }

    println!("  {:<18} {}", "Model:".bold(), config.model);
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "temp: {} | max_output_tokens: {}",
            config.temperature, config.max_output_tokens
        )
        .dimmed()
    );

    println!();
    if config.is_valid() {
        println!("  {} configuration is complete", "✓".green());
    } else {
        println!(
            "  {} configuration is incomplete — run `lumo provider set` or set LUMO_* env vars",
            "✗".red()
        );
    }
    println!();

    Ok(())
}
