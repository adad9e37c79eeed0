use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use voucher_parser::{
    app_state::AppState,
    completion::{CompletionClient, CompletionError},
    router,
};

/// Completion stub that records prompts and replays a fixed answer.
#[derive(Default)]
pub struct RecordingCompletion {
    pub answer: String,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl RecordingCompletion {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn last_user_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .map(|(_, user)| user.clone())
    }
}

#[async_trait]
impl CompletionClient for RecordingCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.answer.clone())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub fn test_app(completion: Arc<dyn CompletionClient>) -> Router {
    router(AppState::with_completion(completion))
}
