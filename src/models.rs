use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Tutor,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STUDENT" => Some(Role::Student),
            "TUTOR" => Some(Role::Tutor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            "COMPLETED" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

pub type ProfileRow = (String, f64, String, String, String, String);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub user_id: String,
    pub hourly_rate: f64,
    pub bio: String,
    pub subjects: Vec<String>,
    pub location: String,
    pub availability: String,
}

impl TutorProfile {
    /// Subjects are stored as a JSON array in a TEXT column.
    pub fn from_row((user_id, hourly_rate, bio, subjects, location, availability): ProfileRow) -> Self {
        TutorProfile {
            user_id,
            hourly_rate,
            bio,
            subjects: serde_json::from_str(&subjects).unwrap_or_default(),
            location,
            availability,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: i64,
    pub read: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub booking_id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: i64,
}
