//! Farming assistant chat endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, models::chat::ChatMessage};

/// Chat message request
#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Session to continue; omit to start a new one
    pub session_id: Option<Uuid>,
    pub message: String,
}

/// Assistant reply
#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: ChatMessage,
}

/// Send a message to the farming assistant
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn send_message(
    State(state): State<crate::AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let (session_id, reply) = state
        .services
        .chat
        .send_message(request.session_id, &request.message)
        .await?;
    Ok(Json(ChatResponse { session_id, reply }))
}

/// Full transcript of a chat session
#[utoipa::path(
    get,
    path = "/chat/{session_id}",
    tag = "chat",
    params(("session_id" = Uuid, Path, description = "Chat session ID")),
    responses(
        (status = 200, description = "Transcript in append order", body = Vec<ChatMessage>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_transcript(
    State(state): State<crate::AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let transcript = state.services.chat.transcript(session_id).await?;
    Ok(Json(transcript))
}
