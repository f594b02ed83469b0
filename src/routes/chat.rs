use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::{AppError, INVALID_JSON, MISSING_MESSAGE},
    message::{ChatRequest, ChatResponse},
    services::prompt::build_prompt,
    state::SharedState,
};

// The body is decoded whatever its content type; a JSON `null` counts as an empty request.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = serde_json::from_slice::<Option<ChatRequest>>(&body)
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected chat body");
            AppError::BadRequest(INVALID_JSON)
        })?
        .unwrap_or_default();

    let message = payload.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::BadRequest(MISSING_MESSAGE));
    }

    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    async move {
        tracing::info!(message_len = message.len(), "incoming chat message");
        tracing::debug!(content = message, "chat message content");

        let prompt = build_prompt(message, &state.knowledge);
        let reply = state
            .generator
            .generate(&prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "error in chat endpoint"))?;

        tracing::info!(reply_len = reply.len(), "reply generated");
        Ok::<_, AppError>(Json(ChatResponse { reply }))
    }
    .instrument(span)
    .await
}
