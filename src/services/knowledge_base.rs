// src/services/knowledge_base.rs
use std::{io::ErrorKind, path::Path};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge base {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only reference document included in every prompt.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    document: Value,
    rendered: String,
}

impl KnowledgeBase {
    /// Load the document at `path`. A missing file gives an empty knowledge base.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "knowledge base not found, continuing without it");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(KnowledgeBaseError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let document = serde_json::from_str(&raw).map_err(|source| KnowledgeBaseError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        let kb = Self::from_value(document);
        tracing::info!(path = %path.display(), empty = kb.is_empty(), "knowledge base loaded");
        Ok(kb)
    }

    pub fn from_value(document: Value) -> Self {
        // Serializing a `Value` into a `String` cannot fail.
        let rendered = serde_json::to_string_pretty(&document).unwrap_or_default();
        Self { document, rendered }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        match &self.document {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Pretty-printed JSON for embedding in a prompt, rendered once on construction.
    pub fn render(&self) -> &str {
        &self.rendered
    }
}
