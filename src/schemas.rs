use crate::handlers::complaints::{ComplaintResponse, CreateComplaintRequest, UpdateStatusRequest};
use crate::handlers::users::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::services::{ComplaintService, ComplaintStatistics, UserService, WeekdayTrend};
use axum::http::HeaderValue;
use model::entities::complaint::{Category, Status};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection, kept for health checks
    pub db: DatabaseConnection,
    /// Registration and login
    pub users: UserService,
    /// Complaint lifecycle
    pub complaints: ComplaintService,
    /// The single frontend origin allowed by CORS
    pub allowed_origin: HeaderValue,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::complaints::create_complaint,
        crate::handlers::complaints::get_complaints,
        crate::handlers::complaints::update_complaint_status,
        crate::handlers::complaints::get_complaint_statistics,
        crate::handlers::users::register_user,
        crate::handlers::users::login,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            Category,
            Status,
            CreateComplaintRequest,
            UpdateStatusRequest,
            ComplaintResponse,
            ComplaintStatistics,
            WeekdayTrend,
            RegisterRequest,
            UserResponse,
            LoginRequest,
            LoginResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "complaints", description = "Complaint submission and status tracking"),
        (name = "users", description = "User registration and login"),
    ),
    info(
        title = "Complaint Desk API",
        description = "Complaint tracking backend: register, log in, file complaints and follow their status",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
