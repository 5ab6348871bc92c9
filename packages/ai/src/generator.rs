// ABOUTME: Abstraction over a text-in, text-out language model
// ABOUTME: Lets agents run against Gemini in production and stubs in tests

use async_trait::async_trait;

use crate::service::AIServiceResult;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether calls can be made at all (e.g. an API key is configured)
    fn is_available(&self) -> bool;

    async fn generate_text(&self, prompt: &str) -> AIServiceResult<String>;
}
