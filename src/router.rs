use crate::handlers::{
    complaints::{create_complaint, get_complaint_statistics, get_complaints, update_complaint_status},
    health::health_check,
    users::{login, register_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Complaint routes
        .route("/api/complaints", post(create_complaint))
        .route("/api/complaints", get(get_complaints))
        .route("/api/complaints/statistics", get(get_complaint_statistics))
        .route("/api/complaints/:complaint_id/status", put(update_complaint_status))
        // User routes
        .route("/api/users/register", post(register_user))
        .route("/api/users/login", post(login))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(cors),
        )
        .with_state(state)
}
