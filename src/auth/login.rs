use axum::{
    Json, debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, models::User, session::USER_EMAIL};

#[derive(Deserialize)]
pub(crate) struct LoginBody {
    email: Option<String>,
    password: Option<String>,
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> AppResult<Response> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    let Some(user) = sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(&db_pool)
    .await?
    else {
        return Err(AppError::Unauthorized);
    };

    if !super::verify_password(&password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    session.insert(USER_EMAIL, &user.email).await?;
    tracing::debug!("login {}", user.email);

    Ok(Json(user).into_response())
}
