#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use student_support_chat::routes::create_router;
use student_support_chat::services::gemini::{GeminiError, ReplyGenerator};
use student_support_chat::services::knowledge_base::KnowledgeBase;
use student_support_chat::state::AppState;

/// Answers every prompt with a fixed reply and remembers what it was asked.
pub struct StubGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Some(reply.to_string()), prompts: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, prompts: Mutex::new(Vec::new()) })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GeminiError::EmptyReply)
    }
}

pub fn app(generator: Arc<StubGenerator>, knowledge: KnowledgeBase) -> axum::Router {
    let state = Arc::new(AppState::new(generator, knowledge));
    create_router("static").with_state(state)
}
