use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, models::User};

pub const USER_EMAIL: &str = "user_email";

/// Resolves the session to its user row. The session only carries the
/// email; everything else is always read fresh from the database.
pub async fn current_user(db_pool: &SqlitePool, session: &Session) -> AppResult<User> {
    let Some(email) = session.get::<String>(USER_EMAIL).await? else {
        return Err(AppError::Unauthorized);
    };

    let Some(user) = sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(db_pool)
    .await?
    else {
        return Err(AppError::NotFound("User not found"));
    };

    Ok(user)
}
