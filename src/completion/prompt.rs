//! Prompt extraction.

use crate::completion::types::Message;

/// Role whose content is treated as the prompt.
pub const USER_ROLE: &str = "user";

/// Return the content of the last `user` message, or `""` if there is none.
///
/// Only the most recent user turn counts; earlier history is ignored.
pub fn extract_last_user_message(messages: &[Message]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == USER_ROLE)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}
