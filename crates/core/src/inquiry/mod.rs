//! Inquiry module - customer inquiries and their uploaded photos.

pub mod error;
pub mod service;
pub mod types;

pub use error::InquiryError;
pub use service::{InquiryRepository, InquiryService};
pub use types::{
    CreatePhotoInput, Inquiry, InquiryPhoto, InquiryStatus, InquiryWithPhotos, NewInquiry,
    NewPhotoUpload, UtmParams,
};
