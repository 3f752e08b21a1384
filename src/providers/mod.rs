//! Completion provider capability and implementations

pub mod compatible;

// Re-export for convenience
pub use compatible::CompatibleClient;

use async_trait::async_trait;

/// A text-completion backend.
///
/// Implementations return the provider's raw JSON body; pulling text out
/// of it is left to [`crate::normalize::extract_text`].
#[async_trait]
pub trait CompletionProvider: Send + Sync
{   /// Name used in logs
    fn name(&self) -> &str;

    /// Run one completion over the given messages
    async fn complete(
      &self
    , model: &str
    , messages: &[crate::ChatMessage]
    , temperature: f32
    , max_tokens: u32
    ) -> Result<serde_json::Value, crate::error::Error>;
}
