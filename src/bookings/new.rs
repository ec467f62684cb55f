use axum::{
    Json, debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, models::Role, session};

use super::{BOOKING_COLS, BookingRow, BookingView, rules};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewBookingBody {
    tutor_id: Option<String>,
    date: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    subject: Option<String>,
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(body): Json<NewBookingBody>,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    let (Some(tutor_id), Some(date), Some(start_time), Some(end_time), Some(subject)) = (
        body.tutor_id,
        body.date,
        body.start_time,
        body.end_time,
        body.subject,
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    match user.role {
        Role::Student => {}
        Role::Tutor => return Err(AppError::Forbidden("Only students can create bookings")),
    }

    if subject.trim().is_empty() {
        return Err(AppError::bad_request("Missing required fields"));
    }
    if !rules::validate_date(&date) {
        return Err(AppError::bad_request("Date must be YYYY-MM-DD"));
    }
    if !rules::validate_slot(&start_time, &end_time) {
        return Err(AppError::bad_request("Invalid time slot"));
    }

    let tutor = sqlx::query_as::<_, (Role,)>("SELECT role FROM users WHERE id = ?")
        .bind(&tutor_id)
        .fetch_optional(&db_pool)
        .await?;
    match tutor {
        Some((Role::Tutor,)) => {}
        Some((Role::Student,)) | None => return Err(AppError::bad_request("Invalid tutor")),
    }

    let id = Uuid::now_v7().to_string();
    let created_at = OffsetDateTime::now_utc().unix_timestamp();

    // Conflict check and insert are one statement, so two racing requests
    // for the same slot cannot both pass the check. Half-open intervals:
    // an existing booking conflicts iff start < new_end AND end > new_start.
    let inserted = sqlx::query(
        "INSERT INTO bookings (id, student_id, tutor_id, date, start_time, end_time, subject, status, created_at) \
         SELECT ?, ?, ?, ?, ?, ?, ?, 'PENDING', ? \
         WHERE NOT EXISTS ( \
             SELECT 1 FROM bookings \
             WHERE tutor_id = ? AND date = ? AND status <> 'CANCELLED' \
               AND start_time < ? AND end_time > ? \
         )",
    )
    .bind(&id)
    .bind(&user.id)
    .bind(&tutor_id)
    .bind(&date)
    .bind(&start_time)
    .bind(&end_time)
    .bind(&subject)
    .bind(created_at)
    .bind(&tutor_id)
    .bind(&date)
    .bind(&end_time)
    .bind(&start_time)
    .execute(&db_pool)
    .await?;

    if inserted.rows_affected() == 0 {
        return Err(AppError::bad_request("This time slot is already booked"));
    }

    let row: BookingRow = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLS} FROM bookings b \
         JOIN users s ON s.id = b.student_id \
         JOIN users t ON t.id = b.tutor_id \
         WHERE b.id = ?"
    ))
    .bind(&id)
    .fetch_one(&db_pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "booking": BookingView::from_row(row),
        })),
    )
        .into_response())
}
