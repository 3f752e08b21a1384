//! The chat pipeline: resolve, assemble, invoke, respond

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::{CoachConfig, ErrorPolicy};
use crate::fallback::FallbackResponder;
use crate::providers::CompletionProvider;
use crate::request::{ChatMessage, ChatRequest, ChatResponse, ResponseStatus};

/// Sampling temperature for every completion
pub const TEMPERATURE: f32 = 0.4;
/// Reply length cap for every completion
pub const MAX_TOKENS: u32 = 280;
/// `model_used` value when the text did not come from a model
pub const FALLBACK_MODEL: &str = "fallback";
/// Reply when the provider call fails under the resilient policy
pub const PROVIDER_APOLOGY_TEXT: &str
  = "Entschuldigung, ich kann gerade nicht antworten. Versuche es später nochmal! 🤖";
/// Reply for unexpected failures under the resilient policy
pub const APOLOGY_TEXT: &str
  = "Entschuldigung, ein Fehler ist aufgetreten. Bitte versuche es später nochmal.";

/// How the reply text was obtained
#[derive(Debug)]
enum Outcome
{   /// Provider produced non-empty text
    Generated(String)
  , /// No provider, or it produced nothing usable
    Substituted(String)
  , /// Provider call failed
    Failed(crate::error::Error)
}

/// Aborts the provider task when the request future is dropped
struct AbortOnDrop(tokio::task::AbortHandle);

impl Drop for AbortOnDrop
{   fn drop(&mut self)
    {   self.0.abort();
    }
}

/// End-to-end chat handler.
///
/// Holds only immutable configuration and the provider handle, so one
/// instance is shared across all concurrent requests.
pub struct ChatOrchestrator
{   config: CoachConfig
  , fallback: FallbackResponder
  , provider: Option<Arc<dyn CompletionProvider>>
}

impl ChatOrchestrator
{   pub fn new(
      config: CoachConfig
    , provider: Option<Arc<dyn CompletionProvider>>
    ) -> Self
    {   debug!(
          "Creating ChatOrchestrator (provider: {})",
          provider.as_ref().map(|p| p.name()).unwrap_or("none")
        );
        ChatOrchestrator
        {   fallback: FallbackResponder::new(config.fallback_policy)
          , config
          , provider
        }
    }

    /// Orchestrator with no provider; every reply is a fallback
    pub fn offline(config: CoachConfig) -> Self
    {   ChatOrchestrator::new(config, None)
    }

    pub fn has_provider(&self) -> bool
    {   self.provider.is_some()
    }

    /// Answer one chat request.
    ///
    /// Under [`ErrorPolicy::Resilient`] this never returns `Err`.
    pub async fn chat(
      &self
    , request: ChatRequest
    ) -> Result<ChatResponse, crate::error::Error>
    {   // Resolving
        let profile = request.language.profile();
        let model = request.model.as_deref()
          .map(str::trim)
          .filter(|m| !m.is_empty())
          .unwrap_or(self.config.default_model.as_str())
          .to_string();
        debug!(
          "Chat request mode={:?} language={} model={}",
          request.mode, profile.code, model
        );

        // Assembling
        let context = crate::context::assemble(&request, profile);

        // Invoking
        let outcome = match self.invoke(&model, &context, &request).await
        {   Ok(outcome) => outcome
          , Err(e) => return self.internal_failure(e)
        };

        // Responding
        match outcome
        {   Outcome::Generated(text) => Ok(ChatResponse
            {   text
              , status: ResponseStatus::Success
              , model_used: model
            })
          , Outcome::Substituted(text) => Ok(ChatResponse
            {   text
              , status: ResponseStatus::Success
              , model_used: FALLBACK_MODEL.to_string()
            })
          , Outcome::Failed(cause) => match self.config.error_policy
            {   ErrorPolicy::Strict => Err(cause)
              , ErrorPolicy::Resilient => Ok(ChatResponse
                {   text: PROVIDER_APOLOGY_TEXT.to_string()
                  , status: ResponseStatus::Error
                  , model_used: FALLBACK_MODEL.to_string()
                })
            }
        }
    }

    async fn invoke(
      &self
    , model: &str
    , context: &[ChatMessage]
    , request: &ChatRequest
    ) -> Result<Outcome, crate::error::Error>
    {   let provider = match &self.provider
        {   Some(p) => Arc::clone(p)
          , None => {
              debug!("No provider configured, using fallback");
              return Ok(Outcome::Substituted(
                self.fallback.respond(context, request)
              ));
            }
        };

        // Spawned so a panicking provider cannot take the request down;
        // the guard cancels the call if the caller goes away.
        let task_model = model.to_string();
        let task_context = context.to_vec();
        let handle = tokio::spawn(async move {
          provider
            .complete(&task_model, &task_context, TEMPERATURE, MAX_TOKENS)
            .await
        });
        let _abort = AbortOnDrop(handle.abort_handle());

        let joined = handle.await.map_err(|e| {
          error!("Provider task aborted: {}", e);
          crate::error::Error::Internal(e.to_string())
        })?;

        match joined
        {   Ok(raw) => {
              let text = crate::normalize::extract_text(&raw);
              if text.is_empty()
              {   warn!("Provider returned no text, using fallback");
                  Ok(Outcome::Substituted(
                    self.fallback.respond(context, request)
                  ))
              } else
              {   info!("Reply generated by {} ({} chars)", model, text.len());
                  Ok(Outcome::Generated(text))
              }
            }
          , Err(cause) => {
              error!("LLM call failed: {}", cause);
              Ok(Outcome::Failed(cause))
            }
        }
    }

    fn internal_failure(
      &self
    , e: crate::error::Error
    ) -> Result<ChatResponse, crate::error::Error>
    {   error!("Chat pipeline error: {}", e);
        match self.config.error_policy
        {   ErrorPolicy::Strict => Err(e)
          , ErrorPolicy::Resilient => Ok(ChatResponse
            {   text: APOLOGY_TEXT.to_string()
              , status: ResponseStatus::Error
              , model_used: FALLBACK_MODEL.to_string()
            })
        }
    }
}
