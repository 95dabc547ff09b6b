//! Terminal input and prompt handling.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Something the user did at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Exit,
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(sender: &str) {
    print!("{}> ", sender);
    std::io::stdout().flush().ok();
}

/// Read lines on a dedicated thread for the life of the process.
///
/// The reader outlives individual sessions so a reconnect never leaves a
/// second thread competing for stdin. Empty lines are skipped.
pub fn spawn_line_reader(sender: String) -> mpsc::UnboundedReceiver<InputEvent> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                input_tx.send(InputEvent::Exit).ok();
                return;
            }
        };

        let prompt = format!("{}> ", sender);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(InputEvent::Line(line.to_string())).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    input_tx.send(InputEvent::Exit).ok();
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    input_tx.send(InputEvent::Exit).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    input_tx.send(InputEvent::Exit).ok();
                    break;
                }
            }
        }
    });

    input_rx
}
