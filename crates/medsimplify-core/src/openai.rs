//! OpenAI chat-completions backend.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::gateway::{ChatRequest, GatewayError, ModelBackend};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const REDACTED: &str = "***REDACTED***";

/// Calls `{base_url}/v1/chat/completions` with a bearer token.
///
/// The inner `reqwest::Client` holds a connection pool and is reused for
/// every request; it carries no per-request state.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a ChatRequest,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl OpenAiBackend {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ModelCallFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.api_key.clone(),
            &config.base_url,
            config.model.clone(),
            config.request_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Wrap a failure message, making sure the key never leaks into it.
    fn failure(&self, detail: impl AsRef<str>) -> GatewayError {
        let msg = format!("Error calling OpenAI API: {}", detail.as_ref());
        GatewayError::ModelCallFailed(redact(&msg, &self.api_key))
    }

    async fn call(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        let body = CompletionBody {
            model: &self.model,
            request,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.failure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("OpenAI API error: {}", status.as_u16()));
            return Err(self.failure(detail));
        }

        let data: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| self.failure(format!("malformed response: {}", e)))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| self.failure("response contained no message content"))
    }
}

impl ModelBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>> {
        Box::pin(self.call(request))
    }
}

fn redact(msg: &str, secret: &str) -> String {
    if secret.is_empty() {
        msg.to_string()
    } else {
        msg.replace(secret, REDACTED)
    }
}
