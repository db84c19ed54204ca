//! Config loader — reads `~/.lumo/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.lumo/config.json`
//! 3. Environment variables `LUMO_<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{AuthMode, Config, Provider};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't
/// be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `LUMO_PROVIDER` → `provider.provider` (`googleAi` / `vertexAi`)
/// - `LUMO_AUTH_MODE` → `provider.auth_mode` (`apiKey` / `serviceAccount`)
/// - `LUMO_API_KEY` → `provider.api_key`
/// - `LUMO_SERVICE_ACCOUNT` → `provider.service_account_path`
/// - `LUMO_PROJECT_ID` → `provider.project_id`
/// - `LUMO_LOCATION` → `provider.location`
/// - `LUMO_MODEL` → `provider.model`
/// - `LUMO_TEMPERATURE` → `provider.temperature`
/// - `LUMO_MAX_OUTPUT_TOKENS` → `provider.max_output_tokens`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("LUMO_PROVIDER") {
        match Provider::parse(&val) {
            Some(p) => config.provider.provider = p,
            None => warn!("Unrecognized LUMO_PROVIDER value: {}", val),
        }
    }
    if let Ok(val) = std::env::var("LUMO_AUTH_MODE") {
        match AuthMode::parse(&val) {
            Some(m) => config.provider.auth_mode = m,
            None => warn!("Unrecognized LUMO_AUTH_MODE value: {}", val),
        }
    }
    if let Ok(val) = std::env::var("LUMO_API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("LUMO_SERVICE_ACCOUNT") {
        config.provider.service_account_path = val;
    }
    if let Ok(val) = std::env::var("LUMO_PROJECT_ID") {
        config.provider.project_id = val;
    }
    if let Ok(val) = std::env::var("LUMO_LOCATION") {
        config.provider.location = val;
    }
    if let Ok(val) = std::env::var("LUMO_MODEL") {
        config.provider.model = val;
    }
    if let Ok(val) = std::env::var("LUMO_TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.provider.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("LUMO_MAX_OUTPUT_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.provider.max_output_tokens = n;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Env vars are process-global; every test that loads config or sets
    // a LUMO_* var holds this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let _guard = env_guard();
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.provider.model, "gemini-1.5-flash");
        assert_eq!(config.provider.location, "us-central1");
    }

    #[test]
    fn test_load_valid_json() {
        let _guard = env_guard();
        let file = write_temp_json(
            r#"{
            "provider": {
                "provider": "vertexAi",
                "projectId": "acme-prod",
                "model": "gemini-1.5-pro",
                "maxOutputTokens": 2048
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.provider, Provider::VertexAi);
        assert_eq!(config.provider.project_id, "acme-prod");
        assert_eq!(config.provider.model, "gemini-1.5-pro");
        assert_eq!(config.provider.max_output_tokens, 2048);
        // Default preserved
        assert_eq!(config.provider.temperature, 0.7);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let _guard = env_guard();
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_empty_json() {
        let _guard = env_guard();
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.provider, Provider::GoogleAi);
    }

    #[test]
    fn test_env_override_model() {
        let _guard = env_guard();
        std::env::set_var("LUMO_MODEL", "gemini-test-model");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.model, "gemini-test-model");
        std::env::remove_var("LUMO_MODEL");
    }

    #[test]
    fn test_env_override_provider() {
        let _guard = env_guard();
        std::env::set_var("LUMO_PROVIDER", "vertex");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.provider, Provider::VertexAi);
        std::env::remove_var("LUMO_PROVIDER");
    }

    #[test]
    fn test_env_override_bad_provider_ignored() {
        let _guard = env_guard();
        std::env::set_var("LUMO_PROVIDER", "no-such-provider");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.provider, Provider::GoogleAi);
        std::env::remove_var("LUMO_PROVIDER");
    }

    #[test]
    fn test_env_override_max_output_tokens() {
        let _guard = env_guard();
        std::env::set_var("LUMO_MAX_OUTPUT_TOKENS", "512");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.max_output_tokens, 512);
        std::env::remove_var("LUMO_MAX_OUTPUT_TOKENS");
    }
}
