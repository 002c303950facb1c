//! Gemini client (generateContent API): chat completion and vision.
//!
//! One client for both seams: `LlmClient` for text chat and
//! `VisionClient` for image description with inline image data.
//! Requires `GEMINI_API_KEY` (or explicit config).

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::llm::{LlmClient, LlmError, LlmResponse};
use crate::message::Message;
use crate::vision::{mime_for_path, ImageSource, VisionClient};

/// Gemini configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, usually from the `GEMINI_API_KEY` environment variable.
    pub api_key: String,
    /// Base URL, default `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    /// Model id, e.g. `gemini-2.5-pro`.
    pub model: String,
}

impl GeminiConfig {
    /// Builds from the environment: `GEMINI_API_KEY` required,
    /// `GEMINI_BASE_URL` and `GEMINI_MODEL` optional.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| LlmError::Auth("GEMINI_API_KEY not set".to_string()))?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-pro".to_string());
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(s: impl Into<String>) -> Self {
        Self {
            text: Some(s.into()),
            inline_data: None,
        }
    }

    fn image(mime: impl Into<String>, data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime.into(),
                data: BASE64.encode(data),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Gemini generateContent client.
///
/// **Interaction**: Implements `LlmClient` (used by the argue pipeline's
/// commentary nodes) and `VisionClient` (used by `argue::VisionNode`).
#[derive(Debug)]
pub struct ChatGemini {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Prompt sent with every image description request.
const DESCRIBE_PROMPT: &str = "Describe this image. Focus on the people and the setting.";

impl ChatGemini {
    /// Builds a client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Builds from the environment (requires `GEMINI_API_KEY`).
    pub fn from_env() -> Result<Self, LlmError> {
        GeminiConfig::from_env().map(Self::new)
    }

    async fn generate(&self, body: &RequestBody) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
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
        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| LlmError::Parsing("response has no candidates".to_string()))?;
        Ok(content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl LlmClient for ChatGemini {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        // Gemini separates the system instruction from the turn contents
        // and names the assistant role "model".
        let mut system: Option<Content> = None;
        let mut contents = Vec::new();
        for m in messages {
            match m {
                Message::System(s) => {
                    system = Some(Content {
                        role: None,
                        parts: vec![Part::text(s.clone())],
                    });
                }
                Message::User(s) => contents.push(Content {
                    role: Some("user"),
                    parts: vec![Part::text(s.clone())],
                }),
                Message::Assistant(s) => contents.push(Content {
                    role: Some("model"),
                    parts: vec![Part::text(s.clone())],
                }),
            }
        }
        let body = RequestBody {
            system_instruction: system,
            contents,
        };
        let content = self.generate(&body).await?;
        Ok(LlmResponse {
            content,
            tool_calls: vec![],
        })
    }
}

#[async_trait]
impl VisionClient for ChatGemini {
    async fn describe(&self, image: &ImageSource) -> Result<String, LlmError> {
        let (data, mime) = match image {
            ImageSource::Path(p) => {
                let data = tokio::fs::read(p).await.map_err(|e| {
                    LlmError::InvalidRequest(format!("cannot read image {}: {e}", p.display()))
                })?;
                (data, mime_for_path(p).to_string())
            }
            ImageSource::Bytes { data, mime } => (data.clone(), mime.clone()),
        };
        let body = RequestBody {
            system_instruction: None,
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part::text(DESCRIBE_PROMPT), Part::image(mime, &data)],
            }],
        };
        self.generate(&body).await
    }
}
