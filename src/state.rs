// src/state.rs
use std::sync::Arc;

use crate::services::{gemini::ReplyGenerator, knowledge_base::KnowledgeBase};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub generator: Arc<dyn ReplyGenerator>,
    pub knowledge: Arc<KnowledgeBase>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ReplyGenerator>, knowledge: KnowledgeBase) -> Self {
        Self {
            generator,
            knowledge: Arc::new(knowledge),
        }
    }
}
