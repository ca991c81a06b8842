//! Admin inquiry management routes.
//!
//! All handlers enforce the admin role before doing anything else, so a
//! non-admin caller sees 403 even when the rest of the request is invalid.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use niwaki_core::inquiry::{
    Inquiry, InquiryError, InquiryPhoto, InquiryService, InquiryStatus, UtmParams,
};
use niwaki_db::InquiryRepository;
use niwaki_shared::ListQuery;

/// Creates the admin inquiry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/inquiries", get(list_inquiries))
        .route("/admin/inquiries/{id}", get(get_inquiry))
        .route("/admin/inquiries/{id}/status", patch(update_status))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a single inquiry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
    /// Inquiry ID.
    pub id: i32,
    /// Customer name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Work site address.
    pub address: Option<String>,
    /// Requested service.
    pub service_type: Option<String>,
    /// Free-form consultation text.
    pub message: String,
    /// Raw marketing parameters captured on the landing page.
    pub utm_params: Option<UtmParams>,
    /// Derived traffic source label.
    pub traffic_source: Option<String>,
    /// First page the visitor landed on.
    pub landing_page: Option<String>,
    /// HTTP referrer, if any.
    pub referrer: Option<String>,
    /// Workflow status.
    pub status: InquiryStatus,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            address: inquiry.address,
            service_type: inquiry.service_type,
            message: inquiry.message,
            utm_params: inquiry.utm_params,
            traffic_source: inquiry.traffic_source,
            landing_page: inquiry.landing_page,
            referrer: inquiry.referrer,
            status: inquiry.status,
            created_at: inquiry.created_at,
            updated_at: inquiry.updated_at,
        }
    }
}

/// Response for a photo row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    /// Photo ID.
    pub id: i32,
    /// Owning inquiry ID.
    pub inquiry_id: i32,
    /// Storage key of the object.
    pub file_key: String,
    /// Public URL of the photo.
    pub url: String,
    /// Original filename.
    pub filename: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub file_size: Option<i64>,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<InquiryPhoto> for PhotoResponse {
    fn from(photo: InquiryPhoto) -> Self {
        Self {
            id: photo.id,
            inquiry_id: photo.inquiry_id,
            file_key: photo.file_key,
            url: photo.url,
            filename: photo.filename,
            mime_type: photo.mime_type,
            file_size: photo.file_size,
            created_at: photo.created_at,
        }
    }
}

/// Response for an inquiry joined with its photos.
#[derive(Debug, Serialize)]
pub struct InquiryDetailResponse {
    /// The inquiry itself.
    #[serde(flatten)]
    pub inquiry: InquiryResponse,
    /// Photos uploaded for this inquiry, oldest first.
    pub photos: Vec<PhotoResponse>,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status value.
    pub status: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reject non-admin callers with a uniform 403 body.
fn require_admin(auth: &AuthUser) -> Result<(), Response> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Administrator access required"
            })),
        )
            .into_response())
    }
}

fn inquiry_service(state: &AppState) -> InquiryService<InquiryRepository> {
    let repo = InquiryRepository::new((*state.db).clone());
    InquiryService::new(state.storage.clone(), Arc::new(repo))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/admin/inquiries`
/// List inquiries newest-first.
async fn list_inquiries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    match inquiry_service(&state).list_inquiries(&query).await {
        Ok(inquiries) => {
            let body: Vec<InquiryResponse> =
                inquiries.into_iter().map(InquiryResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list inquiries");
            match e {
                InquiryError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_limit",
                        "message": msg
                    })),
                )
                    .into_response(),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response(),
            }
        }
    }
}

/// GET `/admin/inquiries/{id}`
/// Fetch one inquiry with its photos.
async fn get_inquiry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    match inquiry_service(&state).get_inquiry(id).await {
        Ok(detail) => {
            let body = InquiryDetailResponse {
                inquiry: InquiryResponse::from(detail.inquiry),
                photos: detail.photos.into_iter().map(PhotoResponse::from).collect(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, inquiry_id = id, "Failed to fetch inquiry");
            match e {
                InquiryError::NotFound(_) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "inquiry_not_found",
                        "message": "Inquiry not found"
                    })),
                )
                    .into_response(),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response(),
            }
        }
    }
}

/// PATCH `/admin/inquiries/{id}/status`
/// Move an inquiry through the workflow.
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let Some(status) = InquiryStatus::parse(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": format!("Unknown status: {}", payload.status)
            })),
        )
            .into_response();
    };

    match inquiry_service(&state).update_status(id, status).await {
        Ok(()) => {
            info!(inquiry_id = id, status = status.as_str(), "Inquiry status updated");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(e) => {
            error!(error = %e, inquiry_id = id, "Failed to update status");
            match e {
                InquiryError::NotFound(_) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "inquiry_not_found",
                        "message": "Inquiry not found"
                    })),
                )
                    .into_response(),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response(),
            }
        }
    }
}
