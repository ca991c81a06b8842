//! Public inquiry submission routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use niwaki_core::inquiry::{
    InquiryError, InquiryService, NewInquiry, NewPhotoUpload, UtmParams,
};
use niwaki_db::InquiryRepository;

/// Creates the public inquiry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inquiries", post(create_inquiry))
        .route("/inquiries/{id}/photos", post(upload_photo))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting an inquiry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    /// Customer name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Work site address.
    #[serde(default)]
    pub address: Option<String>,
    /// Requested service.
    #[serde(default)]
    pub service_type: Option<String>,
    /// Free-form consultation text.
    pub message: String,
    /// Raw marketing parameters captured on the landing page.
    #[serde(default)]
    pub utm_params: Option<UtmParams>,
    /// Derived traffic source label.
    #[serde(default)]
    pub traffic_source: Option<String>,
    /// First page the visitor landed on.
    #[serde(default)]
    pub landing_page: Option<String>,
    /// HTTP referrer, if any.
    #[serde(default)]
    pub referrer: Option<String>,
}

/// Response for a created inquiry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Assigned inquiry ID.
    pub inquiry_id: i32,
}

/// Request body for uploading a photo to an inquiry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoRequest {
    /// Original filename.
    pub filename: String,
    /// MIME type of the image.
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub base64_data: String,
}

/// Response for an uploaded photo.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Assigned photo ID.
    pub photo_id: i32,
    /// Public URL of the stored photo.
    pub url: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/inquiries`
/// Accept a new customer inquiry.
async fn create_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<CreateInquiryRequest>,
) -> impl IntoResponse {
    let repo = InquiryRepository::new((*state.db).clone());
    let service = InquiryService::new(state.storage.clone(), Arc::new(repo));

    let input = NewInquiry {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
        service_type: payload.service_type,
        message: payload.message,
        utm_params: payload.utm_params,
        traffic_source: payload.traffic_source,
        landing_page: payload.landing_page,
        referrer: payload.referrer,
    };

    match service.create_inquiry(input).await {
        Ok(inquiry) => {
            info!(
                inquiry_id = inquiry.id,
                traffic_source = inquiry.traffic_source.as_deref().unwrap_or("direct"),
                "Inquiry created"
            );

            (
                StatusCode::CREATED,
                Json(CreateInquiryResponse {
                    success: true,
                    inquiry_id: inquiry.id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create inquiry");
            match e {
                InquiryError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "validation_failed",
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

/// POST `/inquiries/{id}/photos`
/// Attach a photo to an existing inquiry.
async fn upload_photo(
    State(state): State<AppState>,
    Path(inquiry_id): Path<i32>,
    Json(payload): Json<UploadPhotoRequest>,
) -> impl IntoResponse {
    let repo = InquiryRepository::new((*state.db).clone());
    let service = InquiryService::new(state.storage.clone(), Arc::new(repo));

    let input = NewPhotoUpload {
        inquiry_id,
        filename: payload.filename,
        mime_type: payload.mime_type,
        base64_data: payload.base64_data,
    };

    match service.attach_photo(input).await {
        Ok(photo) => {
            info!(
                inquiry_id = inquiry_id,
                photo_id = photo.id,
                file_size = photo.file_size,
                "Photo uploaded"
            );

            (
                StatusCode::CREATED,
                Json(UploadPhotoResponse {
                    success: true,
                    photo_id: photo.id,
                    url: photo.url,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, inquiry_id = inquiry_id, "Failed to upload photo");
            match e {
                InquiryError::NotFound(_) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "inquiry_not_found",
                        "message": "Inquiry not found"
                    })),
                )
                    .into_response(),
                InquiryError::InvalidPayload(msg) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_payload",
                        "message": msg
                    })),
                )
                    .into_response(),
                InquiryError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "storage_error",
                        "message": "Storage operation failed"
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
