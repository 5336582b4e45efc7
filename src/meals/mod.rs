mod dto;
pub mod handlers;
mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/meals",
            get(handlers::list_meals).post(handlers::create_meal),
        )
        .route("/meals/summary", get(handlers::get_summary))
        .route(
            "/meals/:id",
            get(handlers::get_meal)
                .put(handlers::update_meal)
                .delete(handlers::delete_meal),
        )
}
