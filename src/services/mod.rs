pub mod gemini;
pub mod knowledge_base;
pub mod prompt;
