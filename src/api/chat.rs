//! Chat completion endpoint
//!
//! Mirrors the embedded client's prompt assembly on the server side: the
//! date/time block is rebuilt here from the request's `userTimezone`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::ApiState;
use crate::chat::{ChatErrorBody, ChatRequest, ChatResponse, HistoryEntry};
use crate::context::DateTimeInfo;
use crate::conversation::{Speaker, Turn};

type ChatRejection = (StatusCode, Json<ChatErrorBody>);

/// Handle one chat turn
async fn chat(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatRejection> {
    if request.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ChatErrorBody {
                error: "No message provided".to_string(),
                details: None,
            }),
        ));
    }

    tracing::info!(
        history_len = request.history.len(),
        timezone = ?request.user_timezone,
        "chat request received"
    );

    let now = DateTimeInfo::now(request.user_timezone.as_deref());
    let history: Vec<Turn> = request.history.iter().map(entry_to_turn).collect();
    let prompt = state
        .context_builder
        .build(&now, &history, &request.message);

    let Some(completion) = &state.completion else {
        return Err(upstream_failure("no completion backend configured"));
    };

    match completion.complete(&prompt).await {
        Ok(text) => {
            tracing::debug!(chars = text.len(), "chat reply ready");
            Ok(Json(ChatResponse { response: text }))
        }
        Err(e) => {
            tracing::error!(error = %e, "completion call failed");
            Err(upstream_failure(&e.to_string()))
        }
    }
}

/// Wire history entries carry only the speaker flag; rebuild turns for the
/// context builder
fn entry_to_turn(entry: &HistoryEntry) -> Turn {
    Turn {
        id: entry.id,
        text: entry.text.clone(),
        speaker: if entry.is_user {
            Speaker::User
        } else {
            Speaker::Assistant
        },
        created_at: entry.timestamp,
    }
}

fn upstream_failure(details: &str) -> ChatRejection {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatErrorBody {
            error: "Failed to get AI response".to_string(),
            details: Some(details.to_string()),
        }),
    )
}

/// Build the chat router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}
