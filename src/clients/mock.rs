use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::{VisionClient, VisionRequest};
use crate::error::AIError;

/// Shared handle used by tests to script responses and observe calls.
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<Result<String, AIError>>>,
    calls: AtomicUsize,
}

impl MockHandle {
    /// Queue a raw text response.
    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: AIError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// How many requests the mock has served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Scripted mock client: pops queued responses in order, erroring once the
/// script runs out.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }

    pub fn with_responses(responses: Vec<String>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        for response in responses {
            handle.push_response(response);
        }
        (client, handle)
    }
}

#[async_trait]
impl VisionClient for MockClient {
    async fn generate_raw(&self, _request: VisionRequest) -> Result<String, AIError> {
        self.handle.calls.fetch_add(1, Ordering::SeqCst);
        self.handle
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AIError::Mock("no scripted response left".to_string())))
    }

    fn clone_box(&self) -> Box<dyn VisionClient> {
        Box::new(self.clone())
    }
}

/// Mock client for testing that returns empty object responses
#[derive(Debug, Clone, Default)]
pub struct MockVoid;

#[async_trait]
impl VisionClient for MockVoid {
    async fn generate_raw(&self, _request: VisionRequest) -> Result<String, AIError> {
        Ok("{}".to_string())
    }

    fn clone_box(&self) -> Box<dyn VisionClient> {
        Box::new(self.clone())
    }
}
