//! Submission flow for the inquiry form.
//!
//! One flow instance backs one form session: it collects the fields and
//! the photo set, then [`SubmissionFlow::submit`] creates the inquiry and
//! uploads the photos one at a time. The inquiry row and each photo are
//! separate calls; once the row exists, a photo that fails to upload is
//! marked and skipped rather than rolling anything back.

use tracing::{info, warn};

use crate::api::{InquiryDraft, PhotoPayload, SubmissionApi};
use crate::photos::{AddReport, PhotoCandidate, PhotoSet, SelectedPhoto, UploadState};
use crate::utm::PageTracking;

/// Shown when the inquiry itself could not be created.
pub const MSG_SUBMIT_FAILED: &str =
    "送信に失敗しました。お手数ですがお電話でお問い合わせください。";

/// Form fields as typed by the visitor. Blank means not provided.
#[derive(Debug, Clone, Default)]
pub struct InquiryForm {
    /// Visitor's name (required).
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Work site address.
    pub address: String,
    /// Requested service.
    pub service_type: String,
    /// Free-form message (required).
    pub message: String,
}

/// Where the form session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing entered yet.
    Idle,
    /// Visitor is filling the form.
    Collecting,
    /// Submission in flight.
    Submitting,
    /// Inquiry created; photo upload results live on the photo set.
    Success {
        /// Row id assigned by the server.
        inquiry_id: i32,
    },
    /// The inquiry itself could not be created.
    Failed {
        /// Visitor-facing message.
        message: String,
    },
}

/// Rejection returned by [`SubmissionFlow::submit`] before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Name is empty after trimming.
    #[error("お名前を入力してください")]
    MissingName,
    /// Message is empty after trimming.
    #[error("ご相談内容を入力してください")]
    MissingMessage,
    /// A submission is in flight or already succeeded.
    #[error("送信処理はすでに完了しています")]
    NotSubmittable,
}

/// Drives one form session against a [`SubmissionApi`].
#[derive(Debug)]
pub struct SubmissionFlow<A> {
    api: A,
    form: InquiryForm,
    photos: PhotoSet,
    tracking: PageTracking,
    state: FlowState,
}

impl<A: SubmissionApi> SubmissionFlow<A> {
    /// Fresh session with the attribution captured on page load.
    #[must_use]
    pub fn new(api: A, tracking: PageTracking) -> Self {
        Self {
            api,
            form: InquiryForm::default(),
            photos: PhotoSet::new(),
            tracking,
            state: FlowState::Idle,
        }
    }

    /// Current state of the session.
    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Form fields as currently entered.
    #[must_use]
    pub fn form(&self) -> &InquiryForm {
        &self.form
    }

    /// Photos currently attached.
    #[must_use]
    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }

    /// Sets the name field.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.name = value.into();
    }

    /// Sets the email field.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.email = value.into();
    }

    /// Sets the phone field.
    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.phone = value.into();
    }

    /// Sets the address field.
    pub fn set_address(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.address = value.into();
    }

    /// Sets the requested service.
    pub fn set_service_type(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.service_type = value.into();
    }

    /// Sets the message field.
    pub fn set_message(&mut self, value: impl Into<String>) {
        self.touch();
        self.form.message = value.into();
    }

    /// Adds picked files to the photo set, applying the selection rules.
    pub fn add_photos(&mut self, candidates: Vec<PhotoCandidate>) -> AddReport {
        self.touch();
        self.photos.add(candidates)
    }

    /// Removes the photo at `index`.
    pub fn remove_photo(&mut self, index: usize) -> Option<SelectedPhoto> {
        self.photos.remove(index)
    }

    /// Submits the form: one create call, then one upload call per photo
    /// that passed the selection rules, in pick order.
    ///
    /// Field validation failures are returned without changing the state,
    /// so the visitor can fix the form and try again. A create failure
    /// moves the session to [`FlowState::Failed`]; a photo failure only
    /// marks that photo and the session still ends in
    /// [`FlowState::Success`].
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        match self.state {
            FlowState::Submitting | FlowState::Success { .. } => {
                return Err(SubmitError::NotSubmittable);
            }
            _ => {}
        }
        if self.form.name.trim().is_empty() {
            return Err(SubmitError::MissingName);
        }
        if self.form.message.trim().is_empty() {
            return Err(SubmitError::MissingMessage);
        }

        self.state = FlowState::Submitting;
        let result = self.api.create_inquiry(self.draft()).await;
        let inquiry_id = match result {
            Ok(receipt) => receipt.inquiry_id,
            Err(error) => {
                warn!(error = %error, "Inquiry submission failed");
                self.state = FlowState::Failed {
                    message: MSG_SUBMIT_FAILED.to_string(),
                };
                return Ok(());
            }
        };

        for index in self.photos.uploadable_indices() {
            let Some(photo) = self.photos.get(index) else {
                continue;
            };
            let payload = PhotoPayload {
                filename: photo.filename.clone(),
                mime_type: photo.mime_type.clone(),
                data: photo.data.clone(),
            };
            self.photos.set_upload_state(index, UploadState::Uploading);
            let result = self.api.upload_photo(inquiry_id, payload).await;
            match result {
                Ok(receipt) => {
                    self.photos.set_upload_state(
                        index,
                        UploadState::Uploaded {
                            photo_id: receipt.photo_id,
                            url: receipt.url,
                        },
                    );
                }
                Err(error) => {
                    warn!(error = %error, index, "Photo upload failed");
                    self.photos.set_upload_state(index, UploadState::Failed);
                }
            }
        }

        let uploaded = self
            .photos
            .photos()
            .iter()
            .filter(|photo| matches!(photo.upload, UploadState::Uploaded { .. }))
            .count();
        info!(inquiry_id, uploaded, "Inquiry submitted");
        self.state = FlowState::Success { inquiry_id };
        Ok(())
    }

    fn touch(&mut self) {
        if self.state == FlowState::Idle {
            self.state = FlowState::Collecting;
        }
    }

    fn draft(&self) -> InquiryDraft {
        InquiryDraft {
            name: self.form.name.trim().to_string(),
            email: none_if_blank(&self.form.email),
            phone: none_if_blank(&self.form.phone),
            address: none_if_blank(&self.form.address),
            service_type: none_if_blank(&self.form.service_type),
            message: self.form.message.trim().to_string(),
            utm_params: self.tracking.to_map(),
            traffic_source: self.tracking.traffic_source(),
            landing_page: self.tracking.landing_page().map(str::to_string),
            referrer: self.tracking.referrer().map(str::to_string),
        }
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use url::Url;

    use super::*;
    use crate::api::{ApiError, InquiryReceipt, PhotoReceipt};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(InquiryDraft),
        Upload { inquiry_id: i32, filename: String },
    }

    #[derive(Debug, Default, Clone)]
    struct MockApi {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_create: bool,
        fail_upload_of: Option<&'static str>,
        next_photo_id: Arc<AtomicI32>,
    }

    impl MockApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SubmissionApi for MockApi {
        async fn create_inquiry(&self, draft: InquiryDraft) -> Result<InquiryReceipt, ApiError> {
            self.calls.lock().unwrap().push(Call::Create(draft));
            if self.fail_create {
                return Err(ApiError::Transport("connection reset".to_string()));
            }
            Ok(InquiryReceipt { inquiry_id: 1 })
        }

        async fn upload_photo(
            &self,
            inquiry_id: i32,
            photo: PhotoPayload,
        ) -> Result<PhotoReceipt, ApiError> {
            self.calls.lock().unwrap().push(Call::Upload {
                inquiry_id,
                filename: photo.filename.clone(),
            });
            if self.fail_upload_of == Some(photo.filename.as_str()) {
                return Err(ApiError::Api {
                    status: 500,
                    message: "Failed to store photo".to_string(),
                });
            }
            let photo_id = self.next_photo_id.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(PhotoReceipt {
                photo_id,
                url: format!("http://files.example.jp/inquiries/{inquiry_id}/{}", photo.filename),
            })
        }
    }

    fn flow_with(mock: &MockApi) -> SubmissionFlow<MockApi> {
        SubmissionFlow::new(mock.clone(), PageTracking::default())
    }

    fn image(filename: &str) -> PhotoCandidate {
        PhotoCandidate {
            filename: filename.to_string(),
            mime_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"fake jpeg bytes"),
        }
    }

    #[test]
    fn editing_moves_the_session_from_idle_to_collecting() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        assert_eq!(flow.state(), &FlowState::Idle);

        flow.set_name("山田太郎");
        assert_eq!(flow.state(), &FlowState::Collecting);
    }

    #[tokio::test]
    async fn submit_requires_a_name() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        flow.set_message("庭木の相談");

        let result = flow.submit().await;
        assert_eq!(result, Err(SubmitError::MissingName));
        assert_eq!(
            SubmitError::MissingName.to_string(),
            "お名前を入力してください"
        );
        assert_eq!(flow.state(), &FlowState::Collecting);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_requires_a_message() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_message("   ");

        let result = flow.submit().await;
        assert_eq!(result, Err(SubmitError::MissingMessage));
        assert_eq!(
            SubmitError::MissingMessage.to_string(),
            "ご相談内容を入力してください"
        );
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn create_failure_shows_the_call_us_message() {
        let mock = MockApi {
            fail_create: true,
            ..MockApi::default()
        };
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_message("庭木の相談");
        flow.add_photos(vec![image("garden.jpg")]);

        flow.submit().await.unwrap();

        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                message: MSG_SUBMIT_FAILED.to_string()
            }
        );
        // The row never existed, so no photo upload was attempted.
        assert_eq!(mock.calls().len(), 1);
        assert!(matches!(mock.calls()[0], Call::Create(_)));
        assert_eq!(flow.photos().photos()[0].upload, UploadState::Pending);
    }

    #[tokio::test]
    async fn happy_path_uploads_photos_in_pick_order() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_email("taro@example.com");
        flow.set_message("庭木の剪定について相談したいです。");
        flow.add_photos(vec![image("front.jpg"), image("back.jpg")]);

        flow.submit().await.unwrap();

        assert_eq!(flow.state(), &FlowState::Success { inquiry_id: 1 });
        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Create(_)));
        assert_eq!(
            calls[1],
            Call::Upload {
                inquiry_id: 1,
                filename: "front.jpg".to_string()
            }
        );
        assert_eq!(
            calls[2],
            Call::Upload {
                inquiry_id: 1,
                filename: "back.jpg".to_string()
            }
        );

        let photos = flow.photos().photos();
        assert_eq!(
            photos[0].upload,
            UploadState::Uploaded {
                photo_id: 1,
                url: "http://files.example.jp/inquiries/1/front.jpg".to_string()
            }
        );
        assert!(matches!(photos[1].upload, UploadState::Uploaded { photo_id: 2, .. }));
    }

    #[tokio::test]
    async fn failed_photo_does_not_abort_the_rest() {
        let mock = MockApi {
            fail_upload_of: Some("middle.jpg"),
            ..MockApi::default()
        };
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_message("庭木の相談");
        flow.add_photos(vec![image("first.jpg"), image("middle.jpg"), image("last.jpg")]);

        flow.submit().await.unwrap();

        assert_eq!(flow.state(), &FlowState::Success { inquiry_id: 1 });
        assert_eq!(mock.calls().len(), 4);

        let photos = flow.photos().photos();
        assert!(matches!(photos[0].upload, UploadState::Uploaded { .. }));
        assert_eq!(photos[1].upload, UploadState::Failed);
        assert!(matches!(photos[2].upload, UploadState::Uploaded { .. }));
    }

    #[tokio::test]
    async fn marked_photos_are_never_sent() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_message("庭木の相談");
        flow.add_photos(vec![
            image("garden.jpg"),
            PhotoCandidate {
                filename: "quote.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                data: Bytes::from_static(b"%PDF-1.4"),
            },
        ]);

        flow.submit().await.unwrap();

        let uploads: Vec<_> = mock
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Upload { .. }))
            .collect();
        assert_eq!(
            uploads,
            [Call::Upload {
                inquiry_id: 1,
                filename: "garden.jpg".to_string()
            }]
        );
        assert_eq!(flow.photos().photos()[1].upload, UploadState::Pending);
    }

    #[tokio::test]
    async fn resubmit_after_success_is_rejected() {
        let mock = MockApi::default();
        let mut flow = flow_with(&mock);
        flow.set_name("山田太郎");
        flow.set_message("庭木の相談");

        flow.submit().await.unwrap();
        let result = flow.submit().await;

        assert_eq!(result, Err(SubmitError::NotSubmittable));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn draft_carries_trimmed_fields_and_attribution() {
        let mock = MockApi::default();
        let url = Url::parse("https://example.jp/lp/pruning?utm_source=google&utm_medium=cpc")
            .unwrap();
        let tracking = PageTracking::capture(&url, Some("https://www.google.com/"));
        let mut flow = SubmissionFlow::new(mock.clone(), tracking);
        flow.set_name("  山田太郎  ");
        flow.set_email("   ");
        flow.set_phone("090-1234-5678");
        flow.set_message("庭木の相談");

        flow.submit().await.unwrap();

        let calls = mock.calls();
        let Call::Create(draft) = &calls[0] else {
            panic!("first call must be the create");
        };
        assert_eq!(draft.name, "山田太郎");
        assert_eq!(draft.email, None);
        assert_eq!(draft.phone.as_deref(), Some("090-1234-5678"));
        assert_eq!(draft.traffic_source.as_deref(), Some("google"));
        assert_eq!(draft.landing_page.as_deref(), Some("/lp/pruning"));
        assert_eq!(draft.referrer.as_deref(), Some("https://www.google.com/"));
        let utm = draft.utm_params.as_ref().unwrap();
        assert_eq!(utm.get("utm_source").map(String::as_str), Some("google"));
        assert_eq!(utm.get("utm_medium").map(String::as_str), Some("cpc"));
    }
}
