use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use botify_core::config::LlmConfig;
use botify_core::ChatMessage;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API responded with status {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Seam to the completion API. One implementation talks to the real service;
/// tests script their own.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion call over `{instruction} + context + user_input`,
    /// returning the first choice's text.
    async fn complete(
        &self,
        instruction: &str,
        context: &[ChatMessage],
        user_input: Option<&str>,
    ) -> Result<String, LlmError>;
}

/// Build the ordered message list: system instruction first, prior context
/// in order, the current (trimmed) user message last.
pub fn build_messages(
    instruction: &str,
    context: &[ChatMessage],
    user_input: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(context.len() + 2);
    messages.push(ChatMessage::system(instruction));
    messages.extend(context.iter().cloned());
    if let Some(user_input) = user_input {
        messages.push(ChatMessage::user(user_input.trim()));
    }
    messages
}

/// Client for an OpenAI-compatible chat-completions endpoint (Groq by
/// default). No retry, no streaming, no per-call timeout override.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(
        &self,
        instruction: &str,
        context: &[ChatMessage],
        user_input: Option<&str>,
    ) -> Result<String, LlmError> {
        let messages = build_messages(instruction, context, user_input);
        debug!(
            event_name = "llm.complete.request",
            model = %self.model,
            message_count = messages.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(self.completions_endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&ChatCompletionRequest { model: &self.model, messages: &messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api { status, body });
        }

        let decoded: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|error| LlmError::MalformedResponse(error.to_string()))?;
        first_choice(decoded)
            .ok_or_else(|| LlmError::MalformedResponse("response carries no choices".to_string()))
    }
}

fn first_choice(response: ChatCompletionResponse) -> Option<String> {
    response.choices.into_iter().next().and_then(|choice| choice.message.content)
}

#[cfg(test)]
mod tests {
    use botify_core::{ChatMessage, ChatRole};

    use super::{build_messages, first_choice, ChatCompletionResponse};

    #[test]
    fn message_list_puts_instruction_first_and_user_input_last() {
        let context = vec![ChatMessage::user("earlier"), ChatMessage::assistant("reply")];
        let messages = build_messages("instruction", &context, Some("  current question  "));

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[0].content, "instruction");
        assert_eq!(messages[3].role, ChatRole::User);
        assert_eq!(messages[3].content, "current question");
    }

    #[test]
    fn message_list_without_user_input_ends_with_context() {
        let context = vec![ChatMessage::user("earlier")];
        let messages = build_messages("instruction", &context, None);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages.last().map(|message| message.content.as_str()), Some("earlier"));
    }

    #[test]
    fn first_choice_reads_the_message_content() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Bonjour !" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .expect("decode response");

        assert_eq!(first_choice(response).as_deref(), Some("Bonjour !"));
    }

    #[test]
    fn empty_choice_list_yields_none() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).expect("decode response");

        assert_eq!(first_choice(response), None);
    }
}
