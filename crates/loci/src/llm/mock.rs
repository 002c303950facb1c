//! Mock LLM for tests and offline demos.
//!
//! Returns fixed or scripted replies without touching the network.
//! Scripted mode drives multi-round agent loops: the first reply can
//! request a tool call, the next one answer from the tool result.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, LlmResponse, ToolCall};
use crate::message::Message;

enum Behavior {
    /// Always the same reply.
    Fixed(LlmResponse),
    /// Echo the last user message.
    Echo,
    /// Replies in order; the last one repeats once exhausted.
    Scripted(Vec<LlmResponse>),
}

/// Mock LLM: fixed, echoing, or scripted replies.
///
/// **Interaction**: Implements `LlmClient`; used by agent and pipeline
/// tests, and by the demo examples when no API key is configured.
pub struct MockLlm {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockLlm {
    /// Always returns `content` with no tool calls.
    pub fn fixed(content: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fixed(LlmResponse {
                content: content.into(),
                tool_calls: vec![],
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Echoes the last user message back as the assistant reply.
    pub fn echo() -> Self {
        Self {
            behavior: Behavior::Echo,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the given replies in order; the last repeats once the
    /// script is exhausted. Panics on an empty script.
    pub fn scripted(replies: Vec<LlmResponse>) -> Self {
        assert!(!replies.is_empty(), "scripted mock needs at least one reply");
        Self {
            behavior: Behavior::Scripted(replies),
            calls: AtomicUsize::new(0),
        }
    }

    /// Two-round script: first requests one tool call, then answers.
    ///
    /// Round 1 returns `content` plus a call to `tool` with `arguments`;
    /// round 2 returns `answer` with no tool calls, ending an agent loop.
    pub fn tool_call_then_answer(
        tool: impl Into<String>,
        arguments: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self::scripted(vec![
            LlmResponse {
                content: String::new(),
                tool_calls: vec![ToolCall {
                    name: tool.into(),
                    arguments: arguments.into(),
                    id: Some("call-1".to_string()),
                }],
            },
            LlmResponse {
                content: answer.into(),
                tool_calls: vec![],
            },
        ])
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = match &self.behavior {
            Behavior::Fixed(r) => r.clone(),
            Behavior::Echo => {
                let content = messages
                    .iter()
                    .rev()
                    .find_map(|m| match m {
                        Message::User(s) => Some(s.clone()),
                        _ => None,
                    })
                    .unwrap_or_default();
                LlmResponse {
                    content,
                    tool_calls: vec![],
                }
            }
            Behavior::Scripted(replies) => {
                let i = n.min(replies.len() - 1);
                replies[i].clone()
            }
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_always_returns_same_content() {
        let llm = MockLlm::fixed("ok");
        let a = llm.invoke(&[Message::user("x")]).await.unwrap();
        let b = llm.invoke(&[Message::user("y")]).await.unwrap();
        assert_eq!(a.content, "ok");
        assert_eq!(b.content, "ok");
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn echo_returns_last_user_message() {
        let llm = MockLlm::echo();
        let messages = vec![
            Message::system("sys"),
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("second"),
        ];
        let r = llm.invoke(&messages).await.unwrap();
        assert_eq!(r.content, "second");
    }

    #[tokio::test]
    async fn scripted_repeats_last_reply() {
        let llm = MockLlm::tool_call_then_answer("smart_weather", r#"{"city":"Oslo"}"#, "done");
        let first = llm.invoke(&[]).await.unwrap();
        assert_eq!(first.tool_calls.len(), 1);
        assert_eq!(first.tool_calls[0].name, "smart_weather");
        let second = llm.invoke(&[]).await.unwrap();
        assert!(second.tool_calls.is_empty());
        assert_eq!(second.content, "done");
        let third = llm.invoke(&[]).await.unwrap();
        assert_eq!(third.content, "done");
    }
}
