use axum::{
    Json, debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    AppError, AppResult,
    models::{Role, User},
};

#[derive(Deserialize)]
pub(crate) struct RegisterBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<RegisterBody>,
) -> AppResult<Response> {
    let (Some(name), Some(email), Some(password), Some(role)) =
        (body.name, body.email, body.password, body.role)
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Missing required fields"));
    }
    let Some(role) = Role::parse(&role) else {
        return Err(AppError::bad_request("Role must be STUDENT or TUTOR"));
    };

    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request("Email already registered"));
    }

    let id = Uuid::now_v7().to_string();
    let created_at = OffsetDateTime::now_utc().unix_timestamp();
    let password_hash = super::hash_password(&password)?;

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .bind(created_at)
    .execute(&db_pool)
    .await?;

    match role {
        Role::Tutor => {
            // Tutors start with an empty profile and fill it in later.
            sqlx::query("INSERT INTO tutor_profiles (user_id) VALUES (?)")
                .bind(&id)
                .execute(&db_pool)
                .await?;
        }
        Role::Student => {}
    }

    tracing::info!("registered {role:?} {email}");

    let user = User {
        id,
        name,
        email,
        role,
        password_hash,
        created_at,
    };
    Ok((StatusCode::CREATED, Json(user)).into_response())
}
