//! The simplification gateway: fixed prompt in, model prose out.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::ErrorClass;
use crate::prompt::{MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Any failure of the external call: network, auth, quota, malformed body.
    #[error("{0}")]
    ModelCallFailed(String),
}

impl GatewayError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GatewayError::ModelCallFailed(_) => ErrorClass::UpstreamFailure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// A single chat-style request to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Build the fixed simplification request around the caller's text.
    pub fn simplification(raw_text: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: raw_text.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// A text-in/text-out language model service.
pub trait ModelBackend: Send + Sync {
    /// Human-readable provider name (e.g. "OpenAI").
    fn name(&self) -> &str;

    /// Run one completion and return the first message's text content.
    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>>;
}

/// Wraps a [`ModelBackend`] with the fixed simplification contract.
///
/// Cheap to clone; the backend (and its HTTP connection pool) is shared.
#[derive(Clone)]
pub struct Simplifier {
    backend: Arc<dyn ModelBackend>,
}

impl Simplifier {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Rephrase `raw_text` into plain language.
    ///
    /// Callers must reject empty input before getting here. The model output
    /// is returned verbatim and is never retried.
    pub async fn simplify(&self, raw_text: &str) -> Result<String, GatewayError> {
        let request = ChatRequest::simplification(raw_text);

        tracing::debug!(
            backend = self.backend.name(),
            chars = raw_text.chars().count(),
            "calling model"
        );

        match self.backend.complete(&request).await {
            Ok(output) => {
                tracing::info!(
                    backend = self.backend.name(),
                    output_chars = output.chars().count(),
                    "model call succeeded"
                );
                Ok(output)
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "model call failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockModel, MockResponse};

    #[test]
    fn request_holds_fixed_prompt_and_settings() {
        let req = ChatRequest::simplification("Take 2 tablets daily");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].content, "Take 2 tablets daily");
        assert_eq!(req.temperature, 0.2);
        assert_eq!(req.max_tokens, 800);
    }

    #[tokio::test]
    async fn simplify_returns_model_output_verbatim() {
        let mock = Arc::new(MockModel::new(MockResponse::Reply(
            "  Put the pump on your belly.\n".into(),
        )));
        let simplifier = Simplifier::new(mock.clone());
        assert_eq!(simplifier.backend_name(), "Mock");

        let out = simplifier.simplify("How do I put in my insulin pump?").await;
        assert_eq!(out.unwrap(), "  Put the pump on your belly.\n");
        assert_eq!(mock.call_count(), 1);

        let seen = mock.last_request().unwrap();
        assert_eq!(seen.messages[1].content, "How do I put in my insulin pump?");
    }

    #[tokio::test]
    async fn simplify_surfaces_failure_without_retry() {
        let mock = Arc::new(MockModel::new(MockResponse::Fail("quota exceeded".into())));
        let simplifier = Simplifier::new(mock.clone());

        let err = simplifier.simplify("anything").await.unwrap_err();
        assert_eq!(err, GatewayError::ModelCallFailed("quota exceeded".into()));
        assert_eq!(err.class(), ErrorClass::UpstreamFailure);
        assert_eq!(mock.call_count(), 1);
    }
}
