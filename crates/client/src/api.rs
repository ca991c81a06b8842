//! Transport to the public submission endpoints.
//!
//! [`SubmissionApi`] is the seam the flow drives; [`HttpSubmissionApi`] is
//! the real implementation speaking JSON over HTTP. Photo bytes travel
//! base64-encoded inside the JSON body.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;

/// Transport failure surfaced to the flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server answered {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a placeholder when the body was unreadable.
        message: String,
    },

    /// The request never completed.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Inquiry fields as collected from the form, plus attribution.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDraft {
    /// Visitor's name.
    pub name: String,
    /// Contact email, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Work site address, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Requested service, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Free-form message.
    pub message: String,
    /// Captured `utm_*` and click-id parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_params: Option<crate::utm::UtmMap>,
    /// Derived traffic source label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_source: Option<String>,
    /// Path the visitor landed on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    /// Document referrer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// One photo ready to send.
#[derive(Debug, Clone)]
pub struct PhotoPayload {
    /// Name as reported by the file picker.
    pub filename: String,
    /// MIME type as reported by the file picker.
    pub mime_type: String,
    /// Raw file contents.
    pub data: Bytes,
}

/// Server acknowledgement for a created inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryReceipt {
    /// Row id assigned by the server.
    pub inquiry_id: i32,
}

/// Server acknowledgement for a stored photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoReceipt {
    /// Row id assigned by the server.
    pub photo_id: i32,
    /// Public URL of the stored object.
    pub url: String,
}

/// The two calls the submission flow makes.
pub trait SubmissionApi {
    /// Creates the inquiry row and returns its id.
    fn create_inquiry(
        &self,
        draft: InquiryDraft,
    ) -> impl std::future::Future<Output = Result<InquiryReceipt, ApiError>> + Send;

    /// Uploads one photo for an existing inquiry.
    fn upload_photo(
        &self,
        inquiry_id: i32,
        photo: PhotoPayload,
    ) -> impl std::future::Future<Output = Result<PhotoReceipt, ApiError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadPhotoBody {
    filename: String,
    mime_type: String,
    base64_data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInquiryResponse {
    inquiry_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadPhotoResponse {
    photo_id: i32,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// JSON-over-HTTP client for the submission endpoints.
#[derive(Debug, Clone)]
pub struct HttpSubmissionApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpSubmissionApi {
    /// Client against the service root, e.g. `https://api.example.jp/`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| "unexpected server response".to_string(), |b| b.message);
        ApiError::Api { status, message }
    }
}

impl SubmissionApi for HttpSubmissionApi {
    async fn create_inquiry(&self, draft: InquiryDraft) -> Result<InquiryReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint("api/v1/inquiries"))
            .json(&draft)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body: CreateInquiryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(InquiryReceipt {
            inquiry_id: body.inquiry_id,
        })
    }

    async fn upload_photo(
        &self,
        inquiry_id: i32,
        photo: PhotoPayload,
    ) -> Result<PhotoReceipt, ApiError> {
        let body = UploadPhotoBody {
            filename: photo.filename,
            mime_type: photo.mime_type,
            base64_data: BASE64.encode(&photo.data),
        };
        let response = self
            .client
            .post(self.endpoint(&format!("api/v1/inquiries/{inquiry_id}/photos")))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body: UploadPhotoResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(PhotoReceipt {
            photo_id: body.photo_id,
            url: body.url,
        })
    }
}
