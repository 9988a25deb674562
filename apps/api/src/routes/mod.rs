pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/generate", post(resumes::handle_generate))
        .route(
            "/api/v1/resumes/:id/regenerate",
            post(resumes::handle_regenerate),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download),
        )
        .route("/api/v1/resumes/:id/preview", get(resumes::handle_preview))
        .with_state(state)
}
