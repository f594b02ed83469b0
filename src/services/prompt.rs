// src/services/prompt.rs
use super::knowledge_base::KnowledgeBase;

pub const SYSTEM_INSTRUCTION: &str = "You are a compassionate student support assistant. \
Provide brief, empathetic responses for academic/emotional stress. \
For crisis situations (self-harm, unalive), immediately refer to counsellor booking. \
Keep responses under 150 words.";

/// Combine the student's message with the knowledge base into the user turn sent upstream.
pub fn build_prompt(message: &str, knowledge: &KnowledgeBase) -> String {
    let message = message.trim();
    if knowledge.is_empty() {
        return message.to_string();
    }

    format!(
        "Use the following knowledge base as reference material when it is relevant to the student's message.\n\
         Knowledge base:\n```json\n{}\n```\n\n\
         Student message:\n{}",
        knowledge.render(),
        message
    )
}
