//! Text extraction from provider responses of varying shape
//!
//! Providers do not agree on a response layout. Every shape this crate
//! knows about is handled here and nowhere else.

use log::{debug, trace};
use serde_json::Value;

/// Pull the reply text out of a raw provider response.
///
/// Tries an OpenAI-style `choices[0].message.content` first, then a
/// flat `content` field. Returns an empty string when neither holds
/// text; that is a normal outcome, not an error.
pub fn extract_text(response: &Value) -> String
{   if let Some(text) = choices_content(response)
    {   trace!("Extracted text from choices[0].message.content");
        return text;
    }
    if let Some(text) = flat_content(response)
    {   trace!("Extracted text from flat content field");
        return text;
    }
    debug!("Provider response carried no extractable text");
    String::new()
}

fn choices_content(response: &Value) -> Option<String>
{   let content = response
      .get("choices")?
      .as_array()?
      .first()?
      .get("message")?
      .get("content")?;
    non_empty(content)
}

fn flat_content(response: &Value) -> Option<String>
{   non_empty(response.get("content")?)
}

fn non_empty(value: &Value) -> Option<String>
{   let text = value.as_str()?.trim();
    if text.is_empty()
    {   None
    } else
    {   Some(text.to_string())
    }
}
