use axum::{
    Json, debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    AppError, AppResult,
    models::{BookingStatus, Role},
    session,
};

use super::{BOOKING_COLS, BookingRow, BookingView, rules};

#[derive(Deserialize)]
pub(crate) struct UpdateBody {
    status: Option<String>,
}

#[debug_handler]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    let Some(status) = body.status else {
        return Err(AppError::bad_request("Status is required"));
    };
    let Some(new_status) = BookingStatus::parse(&status) else {
        return Err(AppError::bad_request("Unknown status"));
    };

    let Some((student_id, tutor_id, current)) = sqlx::query_as::<_, (String, String, BookingStatus)>(
        "SELECT student_id, tutor_id, status FROM bookings WHERE id = ?",
    )
    .bind(&id)
    .fetch_optional(&db_pool)
    .await?
    else {
        return Err(AppError::NotFound("Booking not found"));
    };

    let owns = match user.role {
        Role::Student => user.id == student_id,
        Role::Tutor => user.id == tutor_id,
    };
    if !owns {
        return Err(AppError::Forbidden("Unauthorized to update this booking"));
    }

    if !rules::can_transition(user.role, current, new_status) {
        return Err(AppError::bad_request("Invalid status transition"));
    }

    sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(new_status)
        .bind(&id)
        .execute(&db_pool)
        .await?;

    let row: BookingRow = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLS} FROM bookings b \
         JOIN users s ON s.id = b.student_id \
         JOIN users t ON t.id = b.tutor_id \
         WHERE b.id = ?"
    ))
    .bind(&id)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(json!({
        "message": "Booking updated successfully",
        "booking": BookingView::from_row(row),
    }))
    .into_response())
}
