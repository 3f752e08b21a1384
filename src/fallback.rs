//! Replies produced without the completion provider

use log::debug;

use crate::config::FallbackPolicy;
use crate::request::{ChatMessage, ChatRequest, Role};

/// Echo reply when the latest message is blank
pub const ECHO_GREETING: &str = "Hi!";

/// Keyword categories in priority order, first hit wins.
///
/// Replies are German regardless of request language.
pub const KEYWORD_REPLIES: &[(&str, &[&str], &str)] = &[
  ( "medication"
  , &["tabletten", "pill", "medikament"]
  , "Vergiss nicht deine Tabletten regelmäßig zu nehmen! ⏰"
  )
, ( "hydration"
  , &["wasser", "water", "trinken"]
  , "Trink genug Wasser! Mindestens 2-3 Liter am Tag sind optimal. 💧"
  )
, ( "weight"
  , &["gewicht", "weight", "abnehmen"]
  , "Gewicht schwankt täglich - wichtig ist der langfristige Trend! 📊"
  )
, ( "exercise"
  , &["sport", "training", "bewegung"]
  , "Regelmäßige Bewegung ist super! Auch 15-20 Minuten täglich helfen. 🏃‍♀️"
  )
, ( "cycle"
  , &["zyklus", "periode", "cycle"]
  , "Tracke deinen Zyklus für bessere Gesundheitsübersicht! 📅"
  )
];

/// Reply when no keyword category matches
pub const GENERIC_REPLY: &str
  = "Ich helfe dir gerne bei deinen Gesundheitszielen! Was möchtest du wissen? 😊";

/// Local reply generator used when the provider is missing or failed
#[derive(Debug, Clone, Copy)]
pub struct FallbackResponder
{   policy: FallbackPolicy
}

impl FallbackResponder
{   pub fn new(policy: FallbackPolicy) -> Self
    {   FallbackResponder { policy }
    }

    pub fn policy(&self) -> FallbackPolicy
    {   self.policy
    }

    /// Produce a reply from the assembled context. Never empty.
    pub fn respond(
      &self
    , context: &[ChatMessage]
    , request: &ChatRequest
    ) -> String
    {   debug!(
          "Fallback reply ({:?}) for {:?}/{}",
          self.policy, request.mode, request.language
        );
        match self.policy
        {   FallbackPolicy::Echo => echo(context)
          , FallbackPolicy::Keyword => keyword(context).to_string()
        }
    }
}

fn echo(context: &[ChatMessage]) -> String
{   let latest = context.last()
      .map(|m| m.content.trim())
      .unwrap_or("");
    if latest.is_empty()
    {   ECHO_GREETING.to_string()
    } else
    {   latest.to_string()
    }
}

fn keyword(context: &[ChatMessage]) -> &'static str
{   let latest = context.iter()
      .rev()
      .find(|m| m.role == Role::User)
      .map(|m| m.content.to_lowercase())
      .unwrap_or_default();

    KEYWORD_REPLIES.iter()
      .find(|(_, words, _)| words.iter().any(|w| latest.contains(w)))
      .map(|(category, _, reply)| {
        debug!("Keyword fallback matched category {}", category);
        *reply
      })
      .unwrap_or(GENERIC_REPLY)
}
