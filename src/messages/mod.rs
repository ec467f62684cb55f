mod conversations;
mod send;
mod thread;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thread::thread).post(send::send))
        .route("/conversations", get(conversations::conversations))
}
