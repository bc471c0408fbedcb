//! Shared test doubles for assistant tests.

use aerwatch_core::chat::{ChatProvider, ChatRequest, ChatResponse};
use aerwatch_core::error::ProviderError;
use aerwatch_core::message::Message;
use async_trait::async_trait;
use std::sync::Mutex;

/// A chat provider that returns scripted responses in sequence and records
/// the requests it received.
pub struct ScriptedChatProvider {
    responses: Mutex<Vec<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Temperatures of the requests seen so far, in call order.
    pub fn temperatures(&self) -> Vec<f32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.temperature)
            .collect()
    }

    /// Message counts of the requests seen so far, in call order.
    pub fn message_counts(&self) -> Vec<usize> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages.len())
            .collect()
    }
}

#[async_trait]
impl ChatProvider for ScriptedChatProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: "Script exhausted".into(),
            });
        }
        let content = responses.remove(0);

        Ok(ChatResponse {
            message: Message::assistant(content),
            usage: None,
            model: request.model,
        })
    }
}
