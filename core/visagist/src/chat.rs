use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::VisagistError;

/// OpenAI chat completions endpoint.
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// One chat completion request: a system prompt plus a user prompt.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier, e.g. `gpt-4`.
    pub model: String,
    /// System role content.
    pub system: String,
    /// User role content.
    pub user: String,
    /// Sampling temperature; backend default when `None`.
    pub temperature: Option<f32>,
    /// Completion token cap; backend default when `None`.
    pub max_tokens: Option<u32>,
}

/// Language-model collaborator with a single call capability.
///
/// The advisory modules take `&dyn ChatClient` so tests can substitute a
/// canned-response fake.
pub trait ChatClient {
    /// Run one completion and return the generated text.
    fn complete(&self, request: &ChatRequest) -> Result<String, VisagistError>;
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Deserialize)]
struct WireChoiceMessage {
    content: String,
}

/// [`ChatClient`] backed by the OpenAI chat completions API.
pub struct OpenAiChatClient {
    api_key: String,
    http: reqwest::blocking::Client,
}

impl OpenAiChatClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl ChatClient for OpenAiChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, VisagistError> {
        debug!("chat completion with model {}", request.model);
        let body = WireRequest {
            model: &request.model,
            messages: [
                WireMessage {
                    role: "system",
                    content: &request.system,
                },
                WireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisagistError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: WireResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| VisagistError::MalformedResponse("no choices in completion".into()))
    }
}
