use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Duration;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::coords::GeodeticPosition;
use crate::predict::PassScanner;
use crate::tracker::Tracker;

use super::api::error::ErrorResponse;
use super::api::look as look_handlers;
use super::api::windows as window_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/look", get(look_handlers::look_angle))
        .route("/api/windows", get(window_handlers::visibility_windows))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("not_found")))
}

pub async fn run_server(
    bind_addr: &str,
    tracker: Tracker,
    station: Option<GeodeticPosition>,
    scanner: PassScanner,
    default_step: Duration,
) -> std::io::Result<()> {
    let state = AppState {
        tracker: Arc::new(tracker),
        station,
        scanner,
        default_step,
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await
}
