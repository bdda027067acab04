//! Trait for the external generative-text service.

use crate::Result;

/// Sends one prompt and returns the completion text.
///
/// Transient, quota and content-safety failures are all reported as errors;
/// there is no partial result.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
