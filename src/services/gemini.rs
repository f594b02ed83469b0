//! Client for the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompt::SYSTEM_INSTRUCTION;
use crate::config::GeminiSettings;

pub const SAFETY_FALLBACK_REPLY: &str = "I am unable to process that specific request due to safety guidelines. \
If you are experiencing a crisis, please seek immediate help or contact a professional counsellor using the booking link.";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to Gemini failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode Gemini response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Gemini returned an empty reply")]
    EmptyReply,
}

/// Produces a reply for a fully built prompt.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, GeminiError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(GeminiError::Client)?;
        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base, self.settings.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart { text: SYSTEM_INSTRUCTION }],
            },
            contents: vec![UserContent {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_ONLY_HIGH",
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        tracing::debug!(
            model = %self.settings.model,
            prompt_len = prompt.len(),
            "sending request to Gemini"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(GeminiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }

        let body: GenerateContentResponse = response.json().await.map_err(GeminiError::Decode)?;
        extract_reply(body)
    }
}

fn extract_reply(body: GenerateContentResponse) -> Result<String, GeminiError> {
    let blocked_prompt = body
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
        .is_some();

    let Some(candidate) = body.candidates.into_iter().next() else {
        tracing::warn!(blocked_prompt, "Gemini returned no candidates");
        return Ok(SAFETY_FALLBACK_REPLY.to_string());
    };
    if blocked_prompt {
        tracing::warn!("Gemini blocked the prompt");
        return Ok(SAFETY_FALLBACK_REPLY.to_string());
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();

    if text.is_empty() {
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            tracing::warn!("Gemini stopped the candidate for safety");
            return Ok(SAFETY_FALLBACK_REPLY.to_string());
        }
        return Err(GeminiError::EmptyReply);
    }

    Ok(text.to_string())
}

// Gemini request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<UserContent<'a>>,
    safety_settings: Vec<SafetySetting<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct UserContent<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting<'a> {
    category: &'a str,
    threshold: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
