pub mod error;
pub mod config;
pub mod profiles;
pub mod request;
pub mod context;
pub mod normalize;
pub mod fallback;
pub mod providers;
pub mod orchestrator;
pub mod status;
pub mod server;
use serde::{Deserialize, Serialize};

/*

gugi is the chat backend of the health tracking app: one /chat endpoint
that answers as the coach "Gugi", delegating generation to any
OpenAI-compatible provider and falling back to local replies when that
provider is missing or broken. Every request is self-contained.

gugi/
├── Cargo.toml
├── src/
│   ├── lib.rs           # Re-exports, Language
│   ├── error.rs         # Error type
│   ├── config.rs        # Policies, provider and server settings
│   ├── profiles.rs      # Per-language prompt bundles
│   ├── request.rs       # ChatRequest / ChatResponse
│   ├── context.rs       # Prompt sequence assembly
│   ├── normalize.rs     # Text extraction from provider responses
│   ├── fallback.rs      # Provider-less replies (echo / keyword)
│   ├── orchestrator.rs  # The chat pipeline
│   ├── providers/       # Completion capability + HTTP client
│   ├── status.rs        # In-memory status check log
│   ├── server.rs        # axum routes
│   └── bin/gugi.rs      # Startup
└── tests/

*/

pub use error::Error;
pub use config::{CoachConfig, ErrorPolicy, FallbackPolicy, ProviderConfig};
pub use profiles::LanguageProfile;
pub use request::{
  ChatMessage, ChatMode, ChatRequest, ChatResponse, ResponseStatus, Role
};
pub use fallback::FallbackResponder;
pub use providers::CompletionProvider;
pub use orchestrator::ChatOrchestrator;

/// Languages the coach speaks. `De` is the system default.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize
)]
#[serde(rename_all = "lowercase")]
pub enum Language
{   /// German
    #[default]
    De
  , /// English
    En
  , /// Polish
    Pl
}

impl Language
{   pub fn code(&self) -> &'static str
    {   match self
        {   Language::De => "de"
          , Language::En => "en"
          , Language::Pl => "pl"
        }
    }

    /// Prompt bundle for this language
    pub fn profile(&self) -> &'static LanguageProfile
    {   profiles::resolve(self.code())
    }
}

impl std::fmt::Display for Language
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.code())
    }
}
