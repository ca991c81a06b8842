//! Inquiry types and data structures.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Workflow status of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    /// Just submitted, nobody has looked at it yet.
    #[default]
    New,
    /// Staff reached out to the customer.
    Contacted,
    /// A quote was sent.
    Quoted,
    /// Work finished.
    Completed,
    /// Customer or staff cancelled.
    Cancelled,
}

impl InquiryStatus {
    /// Convert to the wire/database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Quoted => "quoted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from the wire/database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "quoted" => Some(Self::Quoted),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Opaque tracking attributes captured on the landing page.
///
/// Stored verbatim and never interpreted server-side.
pub type UtmParams = BTreeMap<String, String>;

/// Input for creating an inquiry.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewInquiry {
    /// Customer name.
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    /// Contact email.
    #[garde(inner(email))]
    pub email: Option<String>,
    /// Contact phone number.
    #[garde(skip)]
    pub phone: Option<String>,
    /// Site address.
    #[garde(skip)]
    pub address: Option<String>,
    /// Requested service kind (free text from the form).
    #[garde(skip)]
    pub service_type: Option<String>,
    /// Free-text consultation message.
    #[garde(length(min = 1))]
    pub message: String,
    /// Raw UTM/tracking map.
    #[garde(skip)]
    pub utm_params: Option<UtmParams>,
    /// Human-readable traffic source summary.
    #[garde(skip)]
    pub traffic_source: Option<String>,
    /// Landing page path the visitor arrived on.
    #[garde(skip)]
    pub landing_page: Option<String>,
    /// Document referrer.
    #[garde(skip)]
    pub referrer: Option<String>,
}

/// Persisted inquiry record.
#[derive(Debug, Clone)]
pub struct Inquiry {
    /// Identifier assigned by the store on creation.
    pub id: i32,
    /// Customer name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Site address.
    pub address: Option<String>,
    /// Requested service kind.
    pub service_type: Option<String>,
    /// Free-text consultation message.
    pub message: String,
    /// Raw UTM/tracking map.
    pub utm_params: Option<UtmParams>,
    /// Human-readable traffic source summary.
    pub traffic_source: Option<String>,
    /// Landing page path.
    pub landing_page: Option<String>,
    /// Document referrer.
    pub referrer: Option<String>,
    /// Workflow status.
    pub status: InquiryStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Input for attaching a photo to an inquiry.
#[derive(Debug, Clone)]
pub struct NewPhotoUpload {
    /// Inquiry the photo belongs to.
    pub inquiry_id: i32,
    /// Original filename.
    pub filename: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// Base64-encoded photo bytes.
    pub base64_data: String,
}

/// Input for recording a photo row after the object write.
#[derive(Debug, Clone)]
pub struct CreatePhotoInput {
    /// Inquiry the photo belongs to.
    pub inquiry_id: i32,
    /// Object storage key.
    pub file_key: String,
    /// Public URL the photo is served from.
    pub url: String,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Decoded byte length.
    pub file_size: i64,
}

/// Persisted photo record.
#[derive(Debug, Clone)]
pub struct InquiryPhoto {
    /// Identifier assigned by the store on creation.
    pub id: i32,
    /// Inquiry the photo belongs to.
    pub inquiry_id: i32,
    /// Object storage key.
    pub file_key: String,
    /// Public URL.
    pub url: String,
    /// Original filename.
    pub filename: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Decoded byte length.
    pub file_size: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An inquiry joined with its photos.
#[derive(Debug, Clone)]
pub struct InquiryWithPhotos {
    /// The inquiry record.
    pub inquiry: Inquiry,
    /// Photos ordered by id ascending.
    pub photos: Vec<InquiryPhoto>,
}
