use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace, error};
use serde::Serialize;

use crate::config::ProviderConfig;
use crate::request::ChatMessage;

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a>
{   pub model: &'a str
  , pub messages: &'a [ChatMessage]
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
}

// ===== Client =====

/// Client for any OpenAI-compatible `/chat/completions` API
/// (OpenAI, Mistral, Groq, local servers, ...)
pub struct CompatibleClient
{   name: String
  , api_base: String
  , api_key: String
  , verbose: bool
  , http_client: reqwest::Client
}

impl CompatibleClient
{   /// Build a client from provider configuration
    pub fn new(config: &ProviderConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating CompatibleClient for {}", config.name);

        let api_key = config.api_key.clone()
          .filter(|k| !k.trim().is_empty())
          .ok_or_else(|| {
            error!("No API key for provider: {}", config.name);
            crate::error::Error::MissingApiKey(config.name.clone())
          })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(CompatibleClient
        {   name: config.name.clone()
          , api_base: config.api_base().trim_end_matches('/').to_string()
          , api_key
          , verbose: config.verbose.unwrap_or(false)
          , http_client
        })
    }

    pub fn api_base(&self) -> &str
    {   &self.api_base
    }

}

#[async_trait]
impl super::CompletionProvider for CompatibleClient
{   fn name(&self) -> &str
    {   &self.name
    }

    async fn complete(
      &self
    , model: &str
    , messages: &[ChatMessage]
    , temperature: f32
    , max_tokens: u32
    ) -> Result<serde_json::Value, crate::error::Error>
    {   debug!(
          "Completion via {} model={} messages={}",
          self.name, model, messages.len()
        );

        let request = CompletionRequest
        {   model
          , messages
          , max_tokens: Some(max_tokens)
          , temperature: Some(temperature)
          , stream: Some(false)
        };

        if self.verbose
        {   trace!("Completion request: {:?}", request);
        }

        let response = self.http_client
          .post(format!("{}/chat/completions", self.api_base))
          .header("Authorization", format!("Bearer {}", self.api_key))
          .json(&request)
          .send()
          .await
          .map_err(transport_error)?;

        let status = response.status();
        trace!("Completion response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("{} API error {}: {}", self.name, status, error_text);
            return Err(crate::error::Error::ApiError(
              format!("{} {}: {}", self.name, status, error_text)
            ));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
          error!("Parse error: {}", e);
          crate::error::Error::ParseError(e.to_string())
        })
    }
}

fn transport_error(e: reqwest::Error) -> crate::error::Error
{   if e.is_timeout()
    {   error!("Provider request timed out");
        crate::error::Error::Timeout
    } else
    {   error!("HTTP error: {}", e);
        crate::error::Error::HttpError(e.to_string())
    }
}
