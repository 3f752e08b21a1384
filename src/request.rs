//! Request and response types for the chat endpoint

use serde::{Deserialize, Serialize};

/// Speaker of a single chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

/// One entry of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn new(role: Role, content: impl Into<String>) -> Self
    {   ChatMessage
        {   role
          , content: content.into()
        }
    }

    pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::Assistant, content)
    }
}

/// What the caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode
{   /// One short proactive remark; history is ignored
    Greeting
  , /// Answer the supplied conversation
    #[default]
    Chat
}

/// Incoming chat request
///
/// Every field may be omitted on the wire. `summary` is passed to the
/// provider as-is and never inspected beyond serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest
{   #[serde(default)]
    pub mode: ChatMode
  , #[serde(default)]
    pub language: crate::Language
  , #[serde(default)]
    pub model: Option<String>
  , #[serde(default)]
    pub summary: Option<serde_json::Map<String, serde_json::Value>>
  , #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>
}

impl ChatRequest
{   /// Chat-mode request over the given history
    pub fn chat(
      language: crate::Language
    , messages: Vec<ChatMessage>
    ) -> Self
    {   ChatRequest
        {   mode: ChatMode::Chat
          , language
          , messages: Some(messages)
          , ..ChatRequest::default()
        }
    }

    /// Greeting-mode request
    pub fn greeting(language: crate::Language) -> Self
    {   ChatRequest
        {   mode: ChatMode::Greeting
          , language
          , ..ChatRequest::default()
        }
    }

    pub fn with_summary(
      mut self
    , summary: serde_json::Map<String, serde_json::Value>
    ) -> Self
    {   self.summary = Some(summary);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }
}

/// Outcome flag of a chat reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus
{   Success
  , Error
}

/// Reply envelope returned for every chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse
{   /// Reply body
    pub text: String
  , /// `error` only when a failure was absorbed
    pub status: ResponseStatus
  , /// Model that produced the text, or the fallback sentinel
    pub model_used: String
}
