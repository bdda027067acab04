use tracing::{info, warn};

use super::prompt::{Coordinate, advisory_prompt};
use crate::error::{Error, Result};
use crate::services::TextGenerator;

/// Asks the injected [`TextGenerator`] for routes around a delay.
///
/// One attempt per call, no retries. The returned future does nothing once
/// dropped, so callers cancel or time out by dropping it.
pub struct RouteAdvisor<G> {
    generator: G,
}

impl<G: TextGenerator> RouteAdvisor<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Returns the generated text unmodified. Every failure, whatever its
    /// source, becomes a single [`Error::Advisory`] message.
    #[tracing::instrument(skip(self))]
    pub async fn advise(
        &self,
        delay: Coordinate,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<String> {
        let prompt = advisory_prompt(delay, start, destination);

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                info!(response_len = text.len(), "Route advisory received");
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, "Route advisory failed");
                Err(match e {
                    Error::Advisory(message) => Error::Advisory(message),
                    other => Error::Advisory(format!("Failed to get route suggestions: {other}")),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records prompts and replays a fixed outcome.
    struct Scripted {
        reply: std::result::Result<&'static str, &'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(reply: std::result::Result<&'static str, &'static str>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(Error::HttpStatus {
                    status: 429,
                    body: status.to_string(),
                }),
            }
        }
    }

    fn coords() -> (Coordinate, Coordinate, Coordinate) {
        (
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(3.0, 3.0),
        )
    }

    #[tokio::test]
    async fn test_returns_text_unmodified() {
        let advisor = RouteAdvisor::new(Scripted::new(Ok("  1. Take the 22 bus\n")));
        let (d, s, e) = coords();
        assert_eq!(advisor.advise(d, s, e).await.unwrap(), "  1. Take the 22 bus\n");

        let prompts = advisor.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], advisory_prompt(d, s, e));
    }

    #[tokio::test]
    async fn test_failure_becomes_single_message() {
        let advisor = RouteAdvisor::new(Scripted::new(Err("quota exceeded")));
        let (d, s, e) = coords();
        let err = advisor.advise(d, s, e).await.unwrap_err();

        match err {
            Error::Advisory(message) => {
                assert!(message.starts_with("Failed to get route suggestions"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(advisor.generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_the_future_cancels() {
        struct Hangs;

        #[async_trait::async_trait]
        impl TextGenerator for Hangs {
            async fn generate(&self, _prompt: &str) -> Result<String> {
                std::future::pending().await
            }
        }

        let advisor = RouteAdvisor::new(Hangs);
        let (d, s, e) = coords();
        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            advisor.advise(d, s, e),
        )
        .await;
        assert!(outcome.is_err());
    }
}
