//! `lumo provider` — manage the persisted provider settings.
//!
//! `set` writes the blob, invalidates the selector cache, and runs the
//! configuration probe so a typo'd key is caught immediately instead of
//! on the first chat turn.

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use lumo_core::config::{AuthMode, Provider, ProviderConfig};
use lumo_providers::ServiceSelector;

use crate::helpers;

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Show the persisted provider settings (secrets masked)
    Show,
    /// Persist provider settings and run the configuration probe
    Set {
        /// Provider: `google-ai` or `vertex-ai`
        #[arg(long)]
        provider: String,

        /// Auth mode: `api-key` or `service-account`
        #[arg(long, default_value = "api-key")]
        auth_mode: String,

        /// API key (api-key mode)
        #[arg(long)]
        api_key: Option<String>,

        /// Path to a service-account JSON key file (service-account mode)
        #[arg(long)]
        service_account: Option<String>,

        /// Cloud project identifier (Vertex AI)
        #[arg(long)]
        project_id: Option<String>,

        /// Vertex AI region
        #[arg(long)]
        location: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Maximum tokens per response
        #[arg(long)]
        max_output_tokens: Option<u32>,

        /// Skip the validation probe
        #[arg(long, default_value_t = false)]
        skip_validate: bool,
    },
    /// Remove the persisted provider settings
    Clear,
}

/// Run a provider subcommand.
pub async fn run(selector: &ServiceSelector, action: ProviderCommands) -> Result<()> {
    match action {
        ProviderCommands::Show => show(selector),
        ProviderCommands::Set {
            provider,
            auth_mode,
            api_key,
            service_account,
            project_id,
            location,
            model,
            temperature,
            max_output_tokens,
            skip_validate,
        } => {
            let Some(provider) = Provider::parse(&provider) else {
                bail!("unknown provider {provider:?}; expected google-ai or vertex-ai");
            };
            let Some(auth_mode) = AuthMode::parse(&auth_mode) else {
                bail!("unknown auth mode {auth_mode:?}; expected api-key or service-account");
            };

            let defaults = ProviderConfig::default();
            let config = ProviderConfig {
                provider,
                auth_mode,
                api_key: api_key.unwrap_or_default(),
                service_account_path: service_account
                    .map(|p| helpers::expand_tilde(&p).to_string_lossy().into_owned())
                    .unwrap_or_default(),
                project_id: project_id.unwrap_or_default(),
                location: location.unwrap_or(defaults.location),
                model: model.unwrap_or(defaults.model),
                temperature: temperature.unwrap_or(defaults.temperature),
                max_output_tokens: max_output_tokens.unwrap_or(defaults.max_output_tokens),
            };

            if !config.is_valid() {
                bail!(
                    "incomplete configuration for {}: {}",
                    config.provider.label(),
                    missing_fields_hint(&config)
                );
            }

            selector.settings().set(&config)?;
            selector.invalidate_cache();
            println!(
                "{} provider set to {}",
                "✓".green(),
                config.provider.label()
            );

            if !skip_validate {
                print!("Running configuration probe... ");
                match selector.select_and_validate(None).await {
                    Ok(_) => println!("{}", "ok".green()),
                    Err(e) => {
                        println!("{}", "failed".red());
                        eprintln!("  {e}");
                        eprintln!("  Settings were saved; fix the credentials and re-run, or use --skip-validate.");
                    }
                }
            }
            Ok(())
        }
        ProviderCommands::Clear => {
            selector.settings().clear()?;
            selector.invalidate_cache();
            println!("{} persisted provider settings removed", "✓".green());
            Ok(())
        }
    }
}

fn show(selector: &ServiceSelector) -> Result<()> {
    match selector.settings().get() {
        Some(config) => {
            println!("provider:            {}", config.provider.label());
            println!(
                "authMode:            {}",
                match config.auth_mode {
                    AuthMode::ApiKey => "api-key",
                    AuthMode::ServiceAccount => "service-account",
                }
            );
            println!("apiKey:              {}", helpers::mask_secret(&config.api_key));
            if !config.service_account_path.is_empty() {
                println!("serviceAccountPath:  {}", config.service_account_path);
            }
            if !config.project_id.is_empty() {
                println!("projectId:           {}", config.project_id);
            }
            println!("location:            {}", config.location);
            println!("model:               {}", config.model);
            println!("temperature:         {}", config.temperature);
            println!("maxOutputTokens:     {}", config.max_output_tokens);
        }
        None => println!("(no persisted provider settings; environment defaults apply)"),
    }
    Ok(())
}

/// Name the credential fields the chosen combination still needs.
fn missing_fields_hint(config: &ProviderConfig) -> String {
    let mut missing = Vec::new();
    match config.provider {
        Provider::GoogleAi => {
            if config.api_key.is_empty() {
                missing.push("--api-key");
            }
        }
        Provider::VertexAi => {
            if config.project_id.is_empty() {
                missing.push("--project-id");
            }
            match config.auth_mode {
                AuthMode::ApiKey if config.api_key.is_empty() => missing.push("--api-key"),
                AuthMode::ServiceAccount if config.service_account_path.is_empty() => {
                    missing.push("--service-account")
                }
                _ => {}
            }
        }
    }
    format!("missing {}", missing.join(", "))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_hint_google() {
        let config = ProviderConfig::default();
        assert_eq!(missing_fields_hint(&config), "missing --api-key");
    }

    #[test]
    fn test_missing_fields_hint_vertex_service_account() {
        let config = ProviderConfig {
            provider: Provider::VertexAi,
            auth_mode: AuthMode::ServiceAccount,
            ..Default::default()
        };
        let hint = missing_fields_hint(&config);
        assert!(hint.contains("--project-id"));
        assert!(hint.contains("--service-account"));
    }
}
