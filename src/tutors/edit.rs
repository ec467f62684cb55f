use axum::{
    Json, debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    AppError, AppResult,
    models::{ProfileRow, Role, TutorProfile},
    session,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EditBody {
    hourly_rate: Option<f64>,
    bio: Option<String>,
    subjects: Option<Vec<String>>,
    location: Option<String>,
    availability: Option<String>,
}

/// Partial update of the caller's own profile; absent fields keep their
/// current value.
#[debug_handler]
pub(crate) async fn edit(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(body): Json<EditBody>,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    match user.role {
        Role::Tutor => {}
        Role::Student => return Err(AppError::Forbidden("Only tutors can edit a tutor profile")),
    }

    if body.hourly_rate.is_some_and(|rate| rate < 0.0) {
        return Err(AppError::bad_request("Hourly rate cannot be negative"));
    }

    let Some(row) = sqlx::query_as::<_, ProfileRow>(
        "SELECT user_id, hourly_rate, bio, subjects, location, availability \
         FROM tutor_profiles WHERE user_id = ?",
    )
    .bind(&user.id)
    .fetch_optional(&db_pool)
    .await?
    else {
        return Err(AppError::NotFound("Tutor not found"));
    };

    let mut profile = TutorProfile::from_row(row);
    if let Some(hourly_rate) = body.hourly_rate {
        profile.hourly_rate = hourly_rate;
    }
    if let Some(bio) = body.bio {
        profile.bio = bio;
    }
    if let Some(subjects) = body.subjects {
        profile.subjects = subjects;
    }
    if let Some(location) = body.location {
        profile.location = location;
    }
    if let Some(availability) = body.availability {
        profile.availability = availability;
    }

    sqlx::query(
        "UPDATE tutor_profiles \
         SET hourly_rate = ?, bio = ?, subjects = ?, location = ?, availability = ? \
         WHERE user_id = ?",
    )
    .bind(profile.hourly_rate)
    .bind(&profile.bio)
    .bind(serde_json::to_string(&profile.subjects)?)
    .bind(&profile.location)
    .bind(&profile.availability)
    .bind(&user.id)
    .execute(&db_pool)
    .await?;

    Ok(Json(profile).into_response())
}
