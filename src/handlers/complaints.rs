use crate::error::AppResult;
use crate::schemas::AppState;
use crate::services::{ComplaintStatistics, ComplaintSubmission};
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::NaiveDateTime;
use model::entities::complaint::{self, Category, Status};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use utoipa::ToSchema;

/// Request body for filing a complaint.
///
/// A `complaint_id` sent by the client is ignored; the server assigns one.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateComplaintRequest {
    /// Submitting user, omitted for anonymous complaints
    pub user_id: Option<i32>,
    /// Submitter's name
    pub name: String,
    pub department: String,
    pub category: Category,
    pub description: String,
    /// Initial status, usually NEW
    pub status: Status,
    pub photo_path: Option<String>,
    pub resolution_notes: Option<String>,
    /// Defaults to the time of submission
    pub created_at: Option<NaiveDateTime>,
    /// Defaults to `created_at`
    pub updated_at: Option<NaiveDateTime>,
}

impl From<CreateComplaintRequest> for ComplaintSubmission {
    fn from(request: CreateComplaintRequest) -> Self {
        Self {
            user_id: request.user_id,
            name: request.name,
            department: request.department,
            category: request.category,
            description: request.description,
            status: request.status,
            photo_path: request.photo_path,
            resolution_notes: request.resolution_notes,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Request body for a status change
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Status,
}

/// Complaint as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponse {
    pub complaint_id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub department: String,
    pub category: Category,
    pub description: String,
    pub status: Status,
    pub photo_path: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<complaint::Model> for ComplaintResponse {
    fn from(model: complaint::Model) -> Self {
        Self {
            complaint_id: model.id,
            user_id: model.user_id,
            name: model.name,
            department: model.department,
            category: model.category,
            description: model.description,
            status: model.status,
            photo_path: model.photo_path,
            resolution_notes: model.resolution_notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// File a new complaint
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 200, description = "Complaint stored", body = ComplaintResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_complaint(
    State(state): State<AppState>,
    Json(request): Json<CreateComplaintRequest>,
) -> AppResult<Json<ComplaintResponse>> {
    trace!("Entering create_complaint function");
    let created = state.complaints.create(request.into()).await?;
    Ok(Json(ComplaintResponse::from(created)))
}

/// List every complaint
#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = "complaints",
    responses(
        (status = 200, description = "All complaints, oldest first", body = Vec<ComplaintResponse>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_complaints(State(state): State<AppState>) -> AppResult<Json<Vec<ComplaintResponse>>> {
    trace!("Entering get_complaints function");
    let complaints: Vec<ComplaintResponse> = state
        .complaints
        .list_all()
        .await?
        .into_iter()
        .map(ComplaintResponse::from)
        .collect();
    debug!("Returning {} complaints", complaints.len());
    Ok(Json(complaints))
}

/// Change the status of a complaint
#[utoipa::path(
    put,
    path = "/api/complaints/{complaint_id}/status",
    tag = "complaints",
    params(
        ("complaint_id" = i32, Path, description = "Complaint ID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ComplaintResponse),
        (status = 404, description = "Complaint not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_complaint_status(
    Path(complaint_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<ComplaintResponse>> {
    trace!("Entering update_complaint_status function for complaint_id: {}", complaint_id);
    let updated = state
        .complaints
        .update_status(complaint_id, request.status)
        .await?;
    Ok(Json(ComplaintResponse::from(updated)))
}

/// Counts of complaints by status and category
#[utoipa::path(
    get,
    path = "/api/complaints/statistics",
    tag = "complaints",
    responses(
        (status = 200, description = "Complaint counts", body = ComplaintStatistics),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_complaint_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ComplaintStatistics>> {
    trace!("Entering get_complaint_statistics function");
    Ok(Json(state.complaints.statistics().await?))
}
