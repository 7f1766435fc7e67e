//! Mock model backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::gateway::{ChatRequest, GatewayError, ModelBackend};

/// A configurable mock response for [`MockModel`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Simulate a successful completion.
    Reply(String),
    /// Simulate a failed call with the given message.
    Fail(String),
}

/// A hand-rolled mock implementing [`ModelBackend`] for tests.
///
/// Returns the same response for every call, counts calls, and keeps the
/// last request it saw so tests can inspect the prompt.
pub struct MockModel {
    response: MockResponse,
    call_count: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockModel {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// How many times `complete()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

impl ModelBackend for MockModel {
    fn name(&self) -> &str {
        "Mock"
    }

    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        let response = self.response.clone();

        Box::pin(async move {
            match response {
                MockResponse::Reply(text) => Ok(text),
                MockResponse::Fail(msg) => Err(GatewayError::ModelCallFailed(msg)),
            }
        })
    }
}
