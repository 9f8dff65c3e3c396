use axum::Router;
use axum::routing::{get, post};

use crate::handlers::{auth, forum, health, pricing, vehicles};
use crate::state::AppState;

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/cars", get(vehicles::list_cars))
        .route("/api/cars/{id}", get(vehicles::get_car))
        .route("/api/predict-price", post(pricing::predict_price))
        .route("/api/bike-price", get(pricing::bike_price))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/discussions",
            get(forum::list_discussions).post(forum::create_discussion),
        )
        .route("/api/discussions/{id}/replies", post(forum::add_reply))
        .route("/api/discussions/{id}/like", post(forum::like_discussion))
        .route(
            "/api/discussions/{id}/replies/{reply_id}/like",
            post(forum::like_reply),
        )
        .with_state(state)
}
