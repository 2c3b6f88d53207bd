use async_trait::async_trait;
use cxr_relay::{
    Error, Result,
    llm::{GenerateRequest, LlmClient},
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Mock LLM client that records every request it receives
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
    pub calls: Arc<AtomicUsize>,
    pub completed: Arc<AtomicUsize>,
    pub response: String,
    pub error: Option<(String, Option<String>)>,
    pub delay: Option<Duration>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
            response: "## Technique\nPA view.".to_string(),
            error: None,
            delay: None,
        }
    }

    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    pub fn with_error(mut self, message: &str, code: Option<&str>) -> Self {
        self.error = Some((message.to_string(), code.map(String::from)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn get_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GenerateRequest {
        self.get_requests()
            .pop()
            .expect("mock received no requests")
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_text(&self, request: GenerateRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);

        if let Some((ref message, ref code)) = self.error {
            return Err(Error::provider(message.clone(), code.clone()));
        }

        Ok(self.response.clone())
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
