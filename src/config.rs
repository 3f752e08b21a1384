//! Configuration for the coach pipeline, provider and server

use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// What a provider failure does to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy
{   /// Provider failures surface as server errors
    Strict
  , /// Provider failures are absorbed into an `error`-status reply
    #[default]
    Resilient
}

/// How replies are produced without the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy
{   /// Repeat the latest message back
    Echo
  , /// Canned replies chosen by keyword
    #[default]
    Keyword
}

impl std::str::FromStr for ErrorPolicy
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_ascii_lowercase().as_str()
        {   "strict" => Ok(ErrorPolicy::Strict)
          , "resilient" => Ok(ErrorPolicy::Resilient)
          , other => Err(crate::error::Error::InvalidConfiguration(
              format!("unknown error policy '{}'", other)
            ))
        }
    }
}

impl std::str::FromStr for FallbackPolicy
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_ascii_lowercase().as_str()
        {   "echo" => Ok(FallbackPolicy::Echo)
          , "keyword" => Ok(FallbackPolicy::Keyword)
          , other => Err(crate::error::Error::InvalidConfiguration(
              format!("unknown fallback policy '{}'", other)
            ))
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// Provider name, used in logs
    pub name: String
  , /// API base URL (if custom)
    pub api_base: Option<String>
  , /// Bearer key; without one the provider counts as unconfigured
    pub api_key: Option<String>
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
  , /// Enable detailed logging
    pub verbose: Option<bool>
}

impl ProviderConfig
{   pub fn new(name: impl Into<String>) -> Self
    {   ProviderConfig
        {   name: name.into()
          , api_base: None
          , api_key: None
          , timeout_secs: None
          , verbose: None
        }
    }

    pub fn api_base(&self) -> &str
    {   self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// True when the provider can actually be called
    pub fn is_configured(&self) -> bool
    {   self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Coach configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig
{   /// Model used when a request names none
    pub default_model: String
  , /// Strict or resilient failure handling
    pub error_policy: ErrorPolicy
  , /// Echo or keyword fallback replies
    pub fallback_policy: FallbackPolicy
  , /// Address the HTTP server binds to
    pub bind_addr: String
  , /// Completion provider, if any
    pub provider: Option<ProviderConfig>
}

impl Default for CoachConfig
{   fn default() -> Self
    {   CoachConfig
        {   default_model: DEFAULT_MODEL.to_string()
          , error_policy: ErrorPolicy::default()
          , fallback_policy: FallbackPolicy::default()
          , bind_addr: DEFAULT_BIND_ADDR.to_string()
          , provider: None
        }
    }
}

impl CoachConfig
{   /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
          crate::error::Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    ///
    /// `GUGI_CONFIG` names an optional JSON file used as the base; the
    /// remaining variables override individual fields.
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let var = |key: &str| {
          lookup(key).filter(|v| !v.trim().is_empty())
        };

        let mut config = match var("GUGI_CONFIG")
        {   Some(path) => Self::from_json_file(path)?
          , None => CoachConfig::default()
        };

        if let Some(model) = var("LLM_DEFAULT_MODEL")
        {   config.default_model = model;
        }
        if let Some(policy) = var("COACH_ERROR_POLICY")
        {   config.error_policy = policy.parse()?;
        }
        if let Some(policy) = var("COACH_FALLBACK_POLICY")
        {   config.fallback_policy = policy.parse()?;
        }

        let key = var("LLM_API_KEY");
        let base = var("LLM_API_BASE");
        let timeout = var("LLM_TIMEOUT_SECS")
          .map(|t| t.trim().parse::<u64>().map_err(|e| {
            crate::error::Error::InvalidConfiguration(
              format!("LLM_TIMEOUT_SECS: {}", e)
            )
          }))
          .transpose()?;
        if key.is_some() || base.is_some() || timeout.is_some()
        {   let provider = config.provider
              .get_or_insert_with(|| ProviderConfig::new("openai"));
            if key.is_some()
            {   provider.api_key = key;
            }
            if base.is_some()
            {   provider.api_base = base;
            }
            if timeout.is_some()
            {   provider.timeout_secs = timeout;
            }
        }

        let port = var("PORT");
        let host = var("HOST");
        if port.is_some() || host.is_some()
        {   let (default_host, default_port) = DEFAULT_BIND_ADDR
              .rsplit_once(':')
              .unwrap_or(("0.0.0.0", "8000"));
            let port = port.unwrap_or_else(|| default_port.to_string());
            port.trim().parse::<u16>().map_err(|e| {
              crate::error::Error::InvalidConfiguration(
                format!("PORT: {}", e)
              )
            })?;
            config.bind_addr = format!(
              "{}:{}",
              host.as_deref().unwrap_or(default_host),
              port.trim()
            );
        }

        if !config.provider_configured()
        {   warn!("No LLM API key configured, replies will use the fallback");
        }
        info!(
          "Config: model={} error_policy={:?} fallback_policy={:?}",
          config.default_model, config.error_policy, config.fallback_policy
        );
        Ok(config)
    }

    /// True when a provider with an API key is present
    pub fn provider_configured(&self) -> bool
    {   self.provider.as_ref().is_some_and(ProviderConfig::is_configured)
    }
}
