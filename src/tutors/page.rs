use axum::{
    Json, debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    AppError, AppResult,
    models::{ProfileRow, Role, TutorProfile},
    session,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewView {
    id: String,
    rating: i64,
    comment: String,
    created_at: i64,
    student: StudentName,
}

#[derive(Serialize)]
pub(crate) struct StudentName {
    name: String,
}

#[debug_handler]
pub(crate) async fn page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Response> {
    session::current_user(&db_pool, &session).await?;

    let Some((name, email)) = sqlx::query_as::<_, (String, String)>(
        "SELECT name, email FROM users WHERE id = ? AND role = 'TUTOR'",
    )
    .bind(&id)
    .fetch_optional(&db_pool)
    .await?
    else {
        return Err(AppError::NotFound("Tutor not found"));
    };

    let Some(profile) = sqlx::query_as::<_, ProfileRow>(
        "SELECT user_id, hourly_rate, bio, subjects, location, availability \
         FROM tutor_profiles WHERE user_id = ?",
    )
    .bind(&id)
    .fetch_optional(&db_pool)
    .await?
    else {
        return Err(AppError::NotFound("Tutor not found"));
    };

    let reviews: Vec<(String, i64, String, i64, String)> = sqlx::query_as(
        "SELECT r.id, r.rating, r.comment, r.created_at, s.name \
         FROM reviews r \
         JOIN users s ON s.id = r.student_id \
         WHERE r.tutor_id = ? \
         ORDER BY r.created_at DESC, r.id DESC",
    )
    .bind(&id)
    .fetch_all(&db_pool)
    .await?;

    let reviews: Vec<ReviewView> = reviews
        .into_iter()
        .map(|(id, rating, comment, created_at, name)| ReviewView {
            id,
            rating,
            comment,
            created_at,
            student: StudentName { name },
        })
        .collect();

    Ok(Json(json!({
        "id": id,
        "name": name,
        "email": email,
        "role": Role::Tutor,
        "tutorProfile": TutorProfile::from_row(profile),
        "reviews": reviews,
    }))
    .into_response())
}
