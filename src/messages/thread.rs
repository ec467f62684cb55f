use axum::{
    Json, debug_handler,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, models::Message, session};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadQuery {
    receiver_id: Option<String>,
}

/// The thread between the caller and one counterparty, oldest first.
/// Fetching it marks the counterparty's unread messages as read; the
/// returned rows still show the state the client saw, and fetching
/// again is a no-op.
#[debug_handler]
pub(crate) async fn thread(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<ThreadQuery>,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    let Some(receiver_id) = query.receiver_id else {
        return Err(AppError::bad_request("Receiver ID is required"));
    };

    let messages: Vec<Message> = sqlx::query_as(
        "SELECT id, sender_id, receiver_id, content, created_at, read FROM messages \
         WHERE (sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1) \
         ORDER BY created_at ASC, id ASC",
    )
    .bind(&user.id)
    .bind(&receiver_id)
    .fetch_all(&db_pool)
    .await?;

    sqlx::query("UPDATE messages SET read = 1 WHERE sender_id = ? AND receiver_id = ? AND read = 0")
        .bind(&receiver_id)
        .bind(&user.id)
        .execute(&db_pool)
        .await?;

    Ok(Json(json!({ "messages": messages })).into_response())
}
