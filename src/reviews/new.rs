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

use crate::{
    AppError, AppResult,
    models::{BookingStatus, Review, Role},
    session,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewReviewBody {
    tutor_id: Option<String>,
    booking_id: Option<String>,
    rating: Option<i64>,
    comment: Option<String>,
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(body): Json<NewReviewBody>,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    match user.role {
        Role::Student => {}
        Role::Tutor => return Err(AppError::Forbidden("Only students can leave reviews")),
    }

    let (Some(tutor_id), Some(booking_id), Some(rating)) =
        (body.tutor_id, body.booking_id, body.rating)
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    if !(1..=5).contains(&rating) {
        return Err(AppError::bad_request("Rating must be between 1 and 5"));
    }

    let Some((student_id, booked_tutor_id, status)) =
        sqlx::query_as::<_, (String, String, BookingStatus)>(
            "SELECT student_id, tutor_id, status FROM bookings WHERE id = ?",
        )
        .bind(&booking_id)
        .fetch_optional(&db_pool)
        .await?
    else {
        return Err(AppError::NotFound("Booking not found"));
    };

    if student_id != user.id {
        return Err(AppError::Forbidden("Unauthorized to review this booking"));
    }
    if booked_tutor_id != tutor_id {
        return Err(AppError::bad_request("Tutor does not match the booking"));
    }
    match status {
        BookingStatus::Completed => {}
        _ => return Err(AppError::bad_request("Booking is not completed yet")),
    }

    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM reviews WHERE booking_id = ?")
        .bind(&booking_id)
        .fetch_optional(&db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request("Booking already reviewed"));
    }

    let review = Review {
        id: Uuid::now_v7().to_string(),
        tutor_id,
        student_id: user.id,
        booking_id,
        rating,
        comment: body.comment.unwrap_or_default(),
        created_at: OffsetDateTime::now_utc().unix_timestamp(),
    };

    sqlx::query(
        "INSERT INTO reviews (id, tutor_id, student_id, booking_id, rating, comment, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&review.id)
    .bind(&review.tutor_id)
    .bind(&review.student_id)
    .bind(&review.booking_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.created_at)
    .execute(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(review)).into_response())
}
