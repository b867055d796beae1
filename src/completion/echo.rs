//! Echo responder used when no backend is configured.
//!
//! Pure and deterministic: the same prompt and request ID always produce
//! the same response.

use crate::completion::types::{
    CHAT_COMPLETION_OBJECT, ChatCompletionResponse, Choice, Message, Usage,
};

const ECHO_PREFIX: &str = "Echo: ";

/// Rough token estimate: one token per four bytes, rounded up.
pub fn approximate_tokens(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let tokens = (text.len() + 3) / 4;
    u32::try_from(tokens).unwrap_or(u32::MAX)
}

/// Build the synthetic reply for `prompt`.
pub fn echo_completion(request_id: &str, prompt: &str) -> ChatCompletionResponse {
    let reply = format!("{ECHO_PREFIX}{prompt}");
    let usage = Usage::new(approximate_tokens(prompt), approximate_tokens(&reply));

    ChatCompletionResponse {
        id: request_id.to_string(),
        object: CHAT_COMPLETION_OBJECT.to_string(),
        choices: vec![Choice {
            index: 0,
            message: Message::new("assistant", reply),
            finish_reason: "stop".to_string(),
        }],
        usage,
    }
}
