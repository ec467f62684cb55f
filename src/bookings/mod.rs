mod list;
mod new;
mod rules;
mod status;

use axum::{
    Router,
    routing::{get, patch},
};
use serde::Serialize;

use crate::{AppState, models::BookingStatus};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list).post(new::create))
        .route("/{id}", patch(status::update))
}

#[derive(Serialize)]
pub(crate) struct Party {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingView {
    pub id: String,
    pub student_id: String,
    pub tutor_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub status: BookingStatus,
    pub created_at: i64,
    pub student: Party,
    pub tutor: Party,
}

pub(crate) type BookingRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    BookingStatus,
    i64,
    String,
    String,
    String,
    String,
);

pub(crate) const BOOKING_COLS: &str =
    "b.id, b.student_id, b.tutor_id, b.date, b.start_time, b.end_time, b.subject, b.status, b.created_at, \
     s.name, s.email, t.name, t.email";

impl BookingView {
    pub(crate) fn from_row(row: BookingRow) -> Self {
        let (
            id,
            student_id,
            tutor_id,
            date,
            start_time,
            end_time,
            subject,
            status,
            created_at,
            s_name,
            s_email,
            t_name,
            t_email,
        ) = row;

        BookingView {
            student: Party {
                id: student_id.clone(),
                name: s_name,
                email: s_email,
            },
            tutor: Party {
                id: tutor_id.clone(),
                name: t_name,
                email: t_email,
            },
            id,
            student_id,
            tutor_id,
            date,
            start_time,
            end_time,
            subject,
            status,
            created_at,
        }
    }
}
