use axum::{Json, debug_handler, response::{IntoResponse, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::AppResult;

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Response> {
    session.clear().await;
    Ok(Json(json!({ "message": "Logged out" })).into_response())
}
