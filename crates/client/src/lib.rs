//! Submission flow for the Niwaki inquiry form.
//!
//! This crate models the visitor-facing side of inquiry intake: picking
//! photos under the form's rules, capturing traffic attribution, and
//! driving the two public API calls (create inquiry, upload photo).
//!
//! # Modules
//!
//! - `flow` - Form session state machine
//! - `photos` - Photo selection rules and upload bookkeeping
//! - `api` - HTTP transport to the submission endpoints
//! - `utm` - Attribution captured from the landing URL

pub mod api;
pub mod flow;
pub mod photos;
pub mod utm;

pub use api::{
    ApiError, HttpSubmissionApi, InquiryDraft, InquiryReceipt, PhotoPayload, PhotoReceipt,
    SubmissionApi,
};
pub use flow::{FlowState, InquiryForm, SubmissionFlow, SubmitError, MSG_SUBMIT_FAILED};
pub use photos::{
    AddReport, FileError, PhotoCandidate, PhotoSet, SelectedPhoto, UploadState, MAX_FILES,
    MAX_FILE_SIZE, MSG_TOO_MANY_FILES,
};
pub use utm::{PageTracking, UtmMap};
