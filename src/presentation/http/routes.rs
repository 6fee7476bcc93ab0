// src/presentation/http/routes.rs
use crate::presentation::http::{controllers::sites, state::HttpState};
use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sites/{tenant}", get(sites::resolve_home))
        .route("/sites/{tenant}/{*path}", get(sites::resolve_path))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
