use std::fmt;

/// Custom error type for coach operations
/// Implements Clone so a failure can be logged and still handed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing for the provider
    MissingApiKey(String)
  , /// HTTP transport error
    HttpError(String)
  , /// Provider returned a non-success response
    ApiError(String)
  , /// Failed to parse provider response
    ParseError(String)
  , /// Provider call timed out
    Timeout
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Unexpected failure inside the chat pipeline
    Internal(String)
  , /// I/O failure (config files, listener)
    Io(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// True for failures raised while talking to the provider
    pub fn is_provider_failure(&self) -> bool
    {   matches!(
          self,
          Error::MissingApiKey(_)
            | Error::HttpError(_)
            | Error::ApiError(_)
            | Error::ParseError(_)
            | Error::Timeout
        )
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(provider) => {
              write!(f, "Missing API key for: {}", provider)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Internal(msg) => {
              write!(f, "Internal error: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}
