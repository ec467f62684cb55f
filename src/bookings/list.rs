use axum::{
    Json, debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, session};

use super::{BOOKING_COLS, BookingRow, BookingView};

#[debug_handler]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;

    let rows: Vec<BookingRow> = sqlx::query_as(&format!(
        "SELECT {BOOKING_COLS} FROM bookings b \
         JOIN users s ON s.id = b.student_id \
         JOIN users t ON t.id = b.tutor_id \
         WHERE b.student_id = ?1 OR b.tutor_id = ?1 \
         ORDER BY b.date DESC, b.start_time DESC, b.id DESC"
    ))
    .bind(&user.id)
    .fetch_all(&db_pool)
    .await?;

    let bookings: Vec<BookingView> = rows.into_iter().map(BookingView::from_row).collect();

    Ok(Json(json!({ "bookings": bookings })).into_response())
}
