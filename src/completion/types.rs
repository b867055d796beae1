//! OpenAI-style chat completion wire types.
//!
//! Decoding is lenient: missing fields and explicit `null`s take their
//! defaults and unknown fields are ignored, both for inbound client payloads
//! and for backend replies. Keys are matched exactly (case-sensitive).

use serde::{Deserialize, Deserializer, Serialize};

/// Object tag carried by every completion response.
pub const CHAT_COMPLETION_OBJECT: &str = "chat.completion";

/// Deserialize a field, mapping JSON `null` to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single conversation turn.
///
/// `role` is an open string; values other than `system`, `user` and
/// `assistant` are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Message {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Inbound chat completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatCompletionRequest {
    /// Conversation history, oldest first.
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,

    /// Advisory only. Cleared before the request is relayed to a backend.
    #[serde(deserialize_with = "null_as_default")]
    pub stream: bool,
}

/// Completion response returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatCompletionResponse {
    /// Always overwritten with the resolved request ID before serialization.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: Usage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Choice {
    #[serde(deserialize_with = "null_as_default")]
    pub index: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub message: Message,
    #[serde(deserialize_with = "null_as_default")]
    pub finish_reason: String,
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Usage {
    #[serde(deserialize_with = "null_as_default")]
    pub prompt_tokens: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub completion_tokens: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_tokens: u32,
}

impl Usage {
    /// Build usage with `total_tokens` derived from its parts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}
