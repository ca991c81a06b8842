//! Inquiry service implementation.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use garde::Validate as _;
use niwaki_shared::ListQuery;

use super::error::InquiryError;
use super::types::{
    CreatePhotoInput, Inquiry, InquiryPhoto, InquiryStatus, InquiryWithPhotos, NewInquiry,
    NewPhotoUpload,
};
use crate::storage::StorageService;

/// Repository trait for inquiry persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait InquiryRepository: Send + Sync {
    /// Create a new inquiry record with status `new`.
    fn create(
        &self,
        input: NewInquiry,
    ) -> impl std::future::Future<Output = Result<Inquiry, InquiryError>> + Send;

    /// Record a photo row for an inquiry.
    fn add_photo(
        &self,
        input: CreatePhotoInput,
    ) -> impl std::future::Future<Output = Result<InquiryPhoto, InquiryError>> + Send;

    /// List inquiries newest-first.
    fn list(
        &self,
        limit: u64,
        offset: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Inquiry>, InquiryError>> + Send;

    /// Find an inquiry by ID.
    fn find_by_id(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Inquiry>, InquiryError>> + Send;

    /// List photos for an inquiry, ordered by id ascending.
    fn list_photos(
        &self,
        inquiry_id: i32,
    ) -> impl std::future::Future<Output = Result<Vec<InquiryPhoto>, InquiryError>> + Send;

    /// Set the status of an inquiry; returns whether a row was updated.
    fn update_status(
        &self,
        id: i32,
        status: InquiryStatus,
    ) -> impl std::future::Future<Output = Result<bool, InquiryError>> + Send;

    /// Check if an inquiry exists.
    fn exists(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<bool, InquiryError>> + Send;
}

/// Inquiry service for the submission and admin workflows.
pub struct InquiryService<R: InquiryRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: InquiryRepository> InquiryService<R> {
    /// Create a new inquiry service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Create an inquiry from a submitted form.
    ///
    /// The record is persisted with status `new`. No notifications are sent.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Validation` if the name or message is empty or
    /// the email is malformed.
    pub async fn create_inquiry(&self, input: NewInquiry) -> Result<Inquiry, InquiryError> {
        input
            .validate()
            .map_err(|report| InquiryError::validation(report.to_string()))?;

        self.repo.create(input).await
    }

    /// Attach a photo to an existing inquiry.
    ///
    /// Decodes the payload, writes the object, then records the photo row.
    /// There is no cross-store transaction: if the row insert fails after a
    /// successful write, the object stays in the bucket as an orphan.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The inquiry does not exist
    /// - The payload is not valid base64
    /// - The object write fails (nothing is recorded in that case)
    pub async fn attach_photo(&self, input: NewPhotoUpload) -> Result<InquiryPhoto, InquiryError> {
        if !self.repo.exists(input.inquiry_id).await? {
            return Err(InquiryError::not_found(input.inquiry_id));
        }

        let bytes = BASE64
            .decode(input.base64_data.as_bytes())
            .map_err(|e| InquiryError::invalid_payload(e.to_string()))?;
        let file_size = i64::try_from(bytes.len())
            .map_err(|_| InquiryError::invalid_payload("payload too large"))?;

        let file_key = StorageService::photo_key(input.inquiry_id, &input.filename);
        let url = self.storage.put(&file_key, bytes, &input.mime_type).await?;

        self.repo
            .add_photo(CreatePhotoInput {
                inquiry_id: input.inquiry_id,
                file_key,
                url,
                filename: input.filename,
                mime_type: input.mime_type,
                file_size,
            })
            .await
    }

    /// List inquiries newest-first.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Validation` if the limit is outside 1-100.
    pub async fn list_inquiries(&self, query: &ListQuery) -> Result<Vec<Inquiry>, InquiryError> {
        query
            .validate()
            .map_err(|e| InquiryError::validation(e.to_string()))?;

        self.repo.list(query.limit(), query.offset()).await
    }

    /// Get an inquiry joined with its photos.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::NotFound` if the inquiry does not exist.
    pub async fn get_inquiry(&self, id: i32) -> Result<InquiryWithPhotos, InquiryError> {
        let inquiry = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(InquiryError::NotFound(id))?;
        let photos = self.repo.list_photos(id).await?;

        Ok(InquiryWithPhotos { inquiry, photos })
    }

    /// Set the status of an inquiry and refresh its updated timestamp.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::NotFound` if the id matches no row.
    pub async fn update_status(&self, id: i32, status: InquiryStatus) -> Result<(), InquiryError> {
        let updated = self.repo.update_status(id, status).await?;
        if !updated {
            return Err(InquiryError::not_found(id));
        }
        Ok(())
    }
}
