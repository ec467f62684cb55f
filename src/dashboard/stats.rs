use axum::{
    Json, debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{AppResult, models::Role, session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardStats {
    total_bookings: i64,
    upcoming_bookings: i64,
    completed_bookings: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_earnings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_rating: Option<f64>,
}

#[debug_handler]
pub(crate) async fn stats(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    let today = OffsetDateTime::now_utc().date().to_string();

    let (total_bookings, upcoming_bookings, completed_bookings): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COALESCE(SUM(CASE WHEN date > ?1 AND status <> 'CANCELLED' THEN 1 ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN status = 'COMPLETED' THEN 1 ELSE 0 END), 0) \
         FROM bookings WHERE student_id = ?2 OR tutor_id = ?2",
    )
    .bind(&today)
    .bind(&user.id)
    .fetch_one(&db_pool)
    .await?;

    let mut stats = DashboardStats {
        total_bookings,
        upcoming_bookings,
        completed_bookings,
        total_earnings: None,
        average_rating: None,
    };

    match user.role {
        Role::Tutor => {
            // Flat hourly rate per completed booking, not rate x duration.
            let (earnings,): (f64,) = sqlx::query_as(
                "SELECT COALESCE(SUM(p.hourly_rate), 0.0) \
                 FROM bookings b \
                 JOIN tutor_profiles p ON p.user_id = b.tutor_id \
                 WHERE b.tutor_id = ? AND b.status = 'COMPLETED'",
            )
            .bind(&user.id)
            .fetch_one(&db_pool)
            .await?;
            stats.total_earnings = Some(earnings);
        }
        Role::Student => {
            let (average,): (f64,) = sqlx::query_as(
                "SELECT COALESCE(AVG(rating), 0.0) FROM reviews WHERE student_id = ?",
            )
            .bind(&user.id)
            .fetch_one(&db_pool)
            .await?;
            stats.average_rating = Some(average);
        }
    }

    Ok(Json(stats).into_response())
}
