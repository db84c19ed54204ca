//! Interactive REPL — readline loop with persistent history.
//!
//! The transcript is display-only: every turn sends a single prompt, the
//! provider call carries no memory of earlier turns.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use lumo_core::types::ChatMessage;
use lumo_core::utils;
use lumo_providers::{AiProvider, ServiceSelector};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(selector: &ServiceSelector) -> Result<()> {
    let client = selector.select(None);
    helpers::print_banner(client.name());

    let mut editor = create_editor()?;
    let mut transcript: Vec<ChatMessage> = Vec::new();

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-C / Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye!");
            break;
        }

        if trimmed.eq_ignore_ascii_case("/history") {
            print_transcript(&transcript);
            continue;
        }

        let _ = editor.add_history_entry(&input);

        debug!(prompt_chars = trimmed.len(), "sending prompt");
        helpers::print_thinking();

        transcript.push(ChatMessage::user(trimmed));
        match client.generate(trimmed).await {
            Ok(response) => {
                helpers::clear_thinking();
                transcript.push(ChatMessage::assistant(response.as_str()));
                helpers::print_response(&response);
            }
            Err(e) => {
                helpers::clear_thinking();
                helpers::print_error(&e);
            }
        }
    }

    save_history(&mut editor);
    Ok(())
}

/// Print the in-memory transcript.
fn print_transcript(transcript: &[ChatMessage]) {
    if transcript.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for message in transcript {
        let speaker = if message.is_user { "You" } else { "Lumo" };
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%H:%M:%S"),
            speaker,
            message.content
        );
    }
}

/// Create a rustyline editor with history loaded from
/// `~/.lumo/history/cli_history`.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
    }

    Ok(editor)
}

fn history_path() -> std::path::PathBuf {
    utils::get_history_path().join("cli_history")
}

fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = editor.save_history(&path);
}

fn is_exit_command(input: &str) -> bool {
    EXIT_COMMANDS
        .iter()
        .any(|cmd| input.eq_ignore_ascii_case(cmd))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("/exit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("exits"));
        assert!(!is_exit_command("hello"));
    }
}
