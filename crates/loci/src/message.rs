//! Conversation message types shared by agents and LLM clients.
//!
//! Three roles: System (usually first in the list), User, Assistant.
//! Tool results are fed back to the model as User messages by the
//! tool-calling agent, so no separate Tool role exists here.

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input (or a tool result being fed back to the model).
    User(String),
    /// Model/agent reply.
    Assistant(String),
}

impl Message {
    /// Builds a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Builds an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Message text regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert!(matches!(Message::system("s"), Message::System(_)));
        assert!(matches!(Message::user("u"), Message::User(_)));
        assert!(matches!(Message::assistant("a"), Message::Assistant(_)));
    }

    #[test]
    fn content_ignores_role() {
        assert_eq!(Message::system("hi").content(), "hi");
        assert_eq!(Message::assistant("hi").content(), "hi");
    }
}
