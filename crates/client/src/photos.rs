//! Photo selection for the inquiry form.
//!
//! Selection applies the rules the form shows the visitor: at most
//! [`MAX_FILES`] photos, each an image no larger than [`MAX_FILE_SIZE`]
//! bytes. Files that break a rule stay in the list with an error marker;
//! they occupy a slot until removed and are skipped at upload time.

use bytes::Bytes;

/// Maximum number of photos a single inquiry can carry.
pub const MAX_FILES: usize = 10;

/// Per-file ceiling in bytes (20 MB).
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Notice shown when a picked batch exceeds the remaining slots.
pub const MSG_TOO_MANY_FILES: &str = "写真は最大10枚までです";

/// Why a picked file was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    /// File is larger than [`MAX_FILE_SIZE`].
    TooLarge,
    /// MIME type is not `image/*`.
    NotAnImage,
}

impl FileError {
    /// Visitor-facing message for this rejection.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::TooLarge => "ファイルサイズが20MBを超えています",
            Self::NotAnImage => "画像ファイルのみアップロード可能です",
        }
    }
}

/// Where a selected photo sits in the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Not sent yet.
    #[default]
    Pending,
    /// Request in flight.
    Uploading,
    /// Stored on the server.
    Uploaded {
        /// Row id assigned by the server.
        photo_id: i32,
        /// Public URL of the stored object.
        url: String,
    },
    /// Upload failed; the rest of the submission continues without it.
    Failed,
}

/// A file picked from the visitor's device, before any checks.
#[derive(Debug, Clone)]
pub struct PhotoCandidate {
    /// Name as reported by the file picker.
    pub filename: String,
    /// MIME type as reported by the file picker.
    pub mime_type: String,
    /// Raw file contents.
    pub data: Bytes,
}

/// A candidate after selection, with its rule check result.
#[derive(Debug, Clone)]
pub struct SelectedPhoto {
    /// Name as reported by the file picker.
    pub filename: String,
    /// MIME type as reported by the file picker.
    pub mime_type: String,
    /// Raw file contents.
    pub data: Bytes,
    /// Set when the file broke a selection rule.
    pub error: Option<FileError>,
    /// Upload progress for files that passed the checks.
    pub upload: UploadState,
}

impl SelectedPhoto {
    /// True when the file passed the selection rules.
    #[must_use]
    pub fn is_uploadable(&self) -> bool {
        self.error.is_none()
    }

    /// Visitor-facing error message, if the file was refused.
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(FileError::message)
    }
}

/// Outcome of adding one picked batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddReport {
    /// Files taken into the list without a marker.
    pub accepted: usize,
    /// Files taken into the list with an error marker.
    pub rejected: usize,
    /// Files dropped because the list was full.
    pub truncated: usize,
}

impl AddReport {
    /// Batch-level notice, present only when files were dropped.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        (self.truncated > 0).then_some(MSG_TOO_MANY_FILES)
    }
}

/// The photos currently attached to the form.
#[derive(Debug, Clone, Default)]
pub struct PhotoSet {
    photos: Vec<SelectedPhoto>,
}

impl PhotoSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected photos, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// True when nothing has been selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Slots still open. Marked files count against the cap until removed.
    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        MAX_FILES - self.photos.len()
    }

    /// All selected photos in pick order.
    #[must_use]
    pub fn photos(&self) -> &[SelectedPhoto] {
        &self.photos
    }

    /// Photo at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectedPhoto> {
        self.photos.get(index)
    }

    /// Adds a picked batch, checking each file against the selection rules.
    ///
    /// When the batch is larger than the remaining slots only the first
    /// files that fit are taken; [`AddReport::message`] then carries the
    /// cap notice.
    pub fn add(&mut self, candidates: Vec<PhotoCandidate>) -> AddReport {
        let remaining = self.remaining_slots();
        let truncated = candidates.len().saturating_sub(remaining);

        let mut report = AddReport {
            accepted: 0,
            rejected: 0,
            truncated,
        };
        for candidate in candidates.into_iter().take(remaining) {
            let error = check_candidate(&candidate);
            match error {
                Some(_) => report.rejected += 1,
                None => report.accepted += 1,
            }
            self.photos.push(SelectedPhoto {
                filename: candidate.filename,
                mime_type: candidate.mime_type,
                data: candidate.data,
                error,
                upload: UploadState::Pending,
            });
        }
        report
    }

    /// Removes the photo at `index`, freeing its slot and its bytes.
    pub fn remove(&mut self, index: usize) -> Option<SelectedPhoto> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    /// Photos that passed the checks, in pick order.
    pub fn uploadable(&self) -> impl Iterator<Item = (usize, &SelectedPhoto)> {
        self.photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| photo.is_uploadable())
    }

    /// Indices of photos that passed the checks, in pick order.
    #[must_use]
    pub fn uploadable_indices(&self) -> Vec<usize> {
        self.uploadable().map(|(index, _)| index).collect()
    }

    pub(crate) fn set_upload_state(&mut self, index: usize, state: UploadState) {
        if let Some(photo) = self.photos.get_mut(index) {
            photo.upload = state;
        }
    }
}

/// Size is checked before the MIME type, so an oversize non-image reports
/// the size error.
fn check_candidate(candidate: &PhotoCandidate) -> Option<FileError> {
    if candidate.data.len() > MAX_FILE_SIZE {
        Some(FileError::TooLarge)
    } else if !candidate.mime_type.starts_with("image/") {
        Some(FileError::NotAnImage)
    } else {
        None
    }
}
