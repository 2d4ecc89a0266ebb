//! HTTP surface: router and request handlers.

pub mod handlers;
mod views;

pub use handlers::AppState;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_meals))
        .route("/meal/{id}/", get(handlers::meal_detail))
        .route(
            "/create/",
            get(handlers::create_form).post(handlers::create_meal),
        )
        .route(
            "/edit/{id}/",
            get(handlers::edit_form).post(handlers::edit_meal),
        )
        .route(
            "/delete/{id}/",
            get(handlers::delete_confirm).post(handlers::delete_meal),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
