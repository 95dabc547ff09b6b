//! Message formatting utilities for client display.

use elderscape_server::infrastructure::dto::websocket::{ChatMessage, MessageType};
use elderscape_shared::time::timestamp_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the history snapshot received on join, oldest first
    pub fn format_history(messages: &[ChatMessage]) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");

        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            output.push_str(&format!("Last {} messages:\n", messages.len()));
            for message in messages {
                output.push_str(&Self::format_line(message));
                output.push('\n');
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a live chat or system message
    pub fn format_chat_message(message: &ChatMessage) -> String {
        format!("\n{}\n", Self::format_line(message))
    }

    /// `<time> [sender]: content`, with `*` in front for system messages
    fn format_line(message: &ChatMessage) -> String {
        let timestamp_str = timestamp_to_rfc3339(message.timestamp);
        let marker = match message.r#type {
            MessageType::System => "* ",
            _ => "",
        };
        format!(
            "{} {}[{}]: {}",
            timestamp_str, marker, message.sender, message.content
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
