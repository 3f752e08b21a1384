//! Assembly of the message sequence sent to the provider

use log::{debug, trace};

use crate::profiles::LanguageProfile;
use crate::request::{ChatMessage, ChatMode, ChatRequest};

/// Most recent history entries forwarded in chat mode
pub const HISTORY_WINDOW: usize = 12;

/// Upper bound on the assembled sequence: system prompt, summary
/// entry and the history window.
pub const MAX_CONTEXT_LEN: usize = HISTORY_WINDOW + 2;

/// Build the ordered prompt sequence for one request.
///
/// Layout: system prompt, optional summary entry, then either the
/// greeting instruction or the tail of the caller's history.
pub fn assemble(
  request: &ChatRequest
, profile: &LanguageProfile
) -> Vec<ChatMessage>
{   let mut msgs = Vec::with_capacity(MAX_CONTEXT_LEN);
    msgs.push(ChatMessage::system(profile.system_prompt));

    if let Some(entry) = summary_entry(request, profile)
    {   msgs.push(entry);
    }

    match request.mode
    {   ChatMode::Greeting => {
          msgs.push(ChatMessage::user(profile.greeting_prompt));
        }
      , ChatMode::Chat => {
          let history = request.messages.as_deref().unwrap_or(&[]);
          let skip = history.len().saturating_sub(HISTORY_WINDOW);
          if skip > 0
          {   trace!("Dropping {} old history entries", skip);
          }
          msgs.extend(history[skip..].iter().cloned());
        }
    }

    debug!(
      "Assembled {} messages ({:?}, {})",
      msgs.len(), request.mode, profile.code
    );
    msgs
}

fn summary_entry(
  request: &ChatRequest
, profile: &LanguageProfile
) -> Option<ChatMessage>
{   let summary = request.summary.as_ref()
      .filter(|s| !s.is_empty())?;
    let rendered = serde_json::Value::Object(summary.clone())
      .to_string();
    Some(ChatMessage::system(
      format!("{}: {}", profile.summary_label, rendered)
    ))
}
