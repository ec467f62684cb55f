pub mod appresult;
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod db;
pub mod messages;
pub mod models;
pub mod reviews;
pub mod session;
pub mod tutors;

use axum::{Router, extract::FromRef};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn app(app_state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(1)));

    Router::new()
        .merge(auth::router())
        .nest("/bookings", bookings::router())
        .nest("/messages", messages::router())
        .nest("/tutors", tutors::router())
        .nest("/reviews", reviews::router())
        .nest("/dashboard", dashboard::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
