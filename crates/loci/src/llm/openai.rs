//! OpenAI-compatible LLM client (Chat Completions API).
//!
//! Works against api.openai.com or any compatible endpoint via
//! `OPENAI_BASE_URL`. Optional tools can be set for function calling;
//! when present, the API may return `tool_calls` in the response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm::{LlmClient, LlmError, LlmResponse, ToolCall};
use crate::message::Message;
use crate::tool::ToolSpec;

/// OpenAI-compatible configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key, usually from the `OPENAI_API_KEY` environment variable.
    pub api_key: String,
    /// Base URL, default `https://api.openai.com/v1`; set for compatible
    /// endpoints (Azure, proxies).
    pub base_url: String,
    /// Model id, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Default temperature applied to every request.
    pub default_temperature: Option<f32>,
}

impl OpenAiConfig {
    /// Builds from the environment: `OPENAI_API_KEY` required,
    /// `OPENAI_BASE_URL` and `OPENAI_MODEL` optional.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::Auth("OPENAI_API_KEY not set".to_string()))?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            default_temperature: Some(0.7),
        })
    }
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

fn to_wire(m: &Message) -> WireMessage {
    let (role, content) = match m {
        Message::System(s) => ("system", s.clone()),
        Message::User(s) => ("user", s.clone()),
        Message::Assistant(s) => ("assistant", s.clone()),
    };
    WireMessage { role, content }
}

#[derive(Debug, Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
}

#[derive(Debug, Deserialize)]
struct ResponseFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    id: Option<String>,
    function: ResponseFunction,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ResponseToolCall>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    choices: Vec<ResponseChoice>,
}

/// OpenAI-compatible Chat Completions client.
///
/// **Interaction**: Implements `LlmClient`; used by `ChatAgent` and
/// `ToolCallAgent`. Set tools at construction with `with_tools` to let
/// the model request tool calls.
#[derive(Debug)]
pub struct ChatOpenAi {
    config: OpenAiConfig,
    client: reqwest::Client,
    tools: Vec<ToolSpec>,
}

impl ChatOpenAi {
    /// Builds a client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            tools: Vec::new(),
        }
    }

    /// Builds from the environment (requires `OPENAI_API_KEY`).
    pub fn from_env() -> Result<Self, LlmError> {
        OpenAiConfig::from_env().map(Self::new)
    }

    /// Sets the tools offered to the model (builder).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    fn build_body(&self, messages: &[Message]) -> RequestBody<'_> {
        RequestBody {
            model: &self.config.model,
            messages: messages.iter().map(to_wire).collect(),
            temperature: self.config.default_temperature,
            tools: self
                .tools
                .iter()
                .map(|t| WireTool {
                    kind: "function",
                    function: WireFunction {
                        name: &t.name,
                        description: t.description.as_deref(),
                        parameters: &t.input_schema,
                    },
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LlmClient for ChatOpenAi {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = self.build_body(messages);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(text),
                429 => LlmError::RateLimit(text),
                400..=499 => LlmError::InvalidRequest(text),
                _ => LlmError::ApiError(text),
            });
        }
        let parsed: ResponseBody =
            serde_json::from_str(&text).map_err(|e| LlmError::Parsing(format!("{e}: {text}")))?;
        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| LlmError::Parsing("response has no choices".to_string()))?;
        let tool_calls = message
            .tool_calls
            .into_iter()
            .map(|tc| ToolCall {
                name: tc.function.name,
                arguments: tc.function.arguments,
                id: tc.id,
            })
            .collect();
        Ok(LlmResponse {
            content: message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}
