use axum::{
    Json, debug_handler,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, models::TutorProfile, session};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchQuery {
    subject: Option<String>,
    location: Option<String>,
    max_rate: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TutorCard {
    id: String,
    name: String,
    tutor_profile: TutorProfile,
}

#[debug_handler]
pub(crate) async fn search(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    session::current_user(&db_pool, &session).await?;

    let rows: Vec<(String, String, f64, String, String, String, String)> = sqlx::query_as(
        "SELECT u.id, u.name, p.hourly_rate, p.bio, p.subjects, p.location, p.availability \
         FROM users u \
         JOIN tutor_profiles p ON p.user_id = u.id \
         WHERE u.role = 'TUTOR' \
         ORDER BY u.name, u.id",
    )
    .fetch_all(&db_pool)
    .await?;

    // Subjects live in a JSON column, so the filters run over the
    // decoded profiles instead of in SQL.
    let tutors: Vec<TutorCard> = rows
        .into_iter()
        .map(|(id, name, hourly_rate, bio, subjects, location, availability)| TutorCard {
            name,
            tutor_profile: TutorProfile::from_row((
                id.clone(),
                hourly_rate,
                bio,
                subjects,
                location,
                availability,
            )),
            id,
        })
        .filter(|tutor| {
            let profile = &tutor.tutor_profile;
            let subject_ok = query.subject.as_ref().is_none_or(|wanted| {
                profile.subjects.iter().any(|s| s.eq_ignore_ascii_case(wanted))
            });
            let location_ok = query.location.as_ref().is_none_or(|wanted| {
                profile.location.to_lowercase().contains(&wanted.to_lowercase())
            });
            let rate_ok = query.max_rate.is_none_or(|max| profile.hourly_rate <= max);
            subject_ok && location_ok && rate_ok
        })
        .collect();

    Ok(Json(json!({ "tutors": tutors })).into_response())
}
