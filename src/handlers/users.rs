use crate::error::AppResult;
use crate::repositories::NewUser;
use crate::schemas::AppState;
use axum::{extract::State, response::Json};
use model::entities::user;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};
use utoipa::ToSchema;

const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";

/// Request body for registering a user
#[derive(Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// Login name; duplicates are accepted
    pub username: String,
    /// Stored as given
    pub password: String,
    /// Free-form role label
    pub role: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            role: request.role,
        }
    }
}

/// User response model. The password is never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
        }
    }
}

/// Request body for logging in
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Outcome of a login attempt. Sent with HTTP 200 either way; clients must
/// branch on `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    fn accepted(user: user::Model) -> Self {
        Self {
            success: true,
            username: Some(user.username),
            role: Some(user.role),
            message: None,
        }
    }

    fn rejected() -> Self {
        Self {
            success: false,
            username: None,
            role: None,
            message: Some(LOGIN_FAILED_MESSAGE.to_string()),
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User stored", body = UserResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    trace!("Entering register_user function");
    let user = state.users.register(request.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Check a username and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome; inspect `success`", body = LoginResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username.trim()))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    trace!("Entering login function");
    let response = match state
        .users
        .check_login(&request.username, &request.password)
        .await?
    {
        Some(user) => {
            info!("User '{}' logged in", user.username);
            LoginResponse::accepted(user)
        }
        None => {
            info!("Login attempt rejected");
            LoginResponse::rejected()
        }
    };
    Ok(Json(response))
}
