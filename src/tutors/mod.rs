mod edit;
mod page;
mod search;

use axum::{
    Router,
    routing::{get, put},
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search))
        .route("/profile", put(edit::edit))
        .route("/{id}", get(page::page))
}
