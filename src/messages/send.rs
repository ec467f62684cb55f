use axum::{
    Json, debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, models::Message, session};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendBody {
    content: Option<String>,
    receiver_id: Option<String>,
}

#[debug_handler]
pub(crate) async fn send(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(body): Json<SendBody>,
) -> AppResult<Response> {
    let sender = session::current_user(&db_pool, &session).await?;

    let (Some(content), Some(receiver_id)) = (body.content, body.receiver_id) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    if content.trim().is_empty() {
        return Err(AppError::bad_request("Missing required fields"));
    }

    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM users WHERE id = ?")
        .bind(&receiver_id)
        .fetch_optional(&db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Receiver not found"));
    }

    let message = Message {
        id: Uuid::now_v7().to_string(),
        sender_id: sender.id,
        receiver_id,
        content,
        created_at: OffsetDateTime::now_utc().unix_timestamp(),
        read: false,
    };

    sqlx::query(
        "INSERT INTO messages (id, sender_id, receiver_id, content, created_at, read) \
         VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(&message.id)
    .bind(&message.sender_id)
    .bind(&message.receiver_id)
    .bind(&message.content)
    .bind(message.created_at)
    .execute(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(message)).into_response())
}
