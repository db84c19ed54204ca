//! Shared CLI helpers — path expansion, output formatting.

use std::path::PathBuf;

use colored::Colorize;

use lumo_core::ServiceError;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Mask a secret for display: keep a short prefix, drop the rest.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}…")
}

/// Print an assistant response to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "✦ Lumo".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print a classified provider error to stderr.
pub fn print_error(err: &ServiceError) {
    eprintln!();
    match err.code() {
        Some(code) => eprintln!("{} {} (code {})", "✗".red().bold(), err, code.dimmed()),
        None => eprintln!("{} {}", "✗".red().bold(), err),
    }
    eprintln!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(provider_name: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}  {}", "✦ Lumo".cyan().bold(), version.dimmed(), provider_name.dimmed());
    println!(
        "{}",
        "Type a message, \"/history\" for the transcript, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/bar");
        assert!(result.ends_with("foo/bar"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn mask_secret_keeps_prefix_only() {
        assert_eq!(mask_secret("AIzaSyExample123"), "AIza…");
        assert_eq!(mask_secret("ab"), "ab…");
        assert_eq!(mask_secret(""), "(not set)");
    }
}
