//! Upload page controller
//!
//! Two sequential steps: store the image bytes, then insert the metadata
//! row pointing at the image's public URL. The steps are not atomic; an
//! object whose metadata insert failed stays in the bucket.

use std::time::Duration;

use auth::SessionManager;
use chrono::Utc;
use common::{GalleryError, GalleryResult, Notice};
use tracing::{debug, error, info, warn};

use crate::form::UploadForm;
use crate::progress::{ProgressSink, ProgressStage};
use crate::repository::PhotoRepository;
use crate::selection::SelectedFile;
use crate::storage::{ObjectStorage, generate_object_name};

/// Message shown after a successful upload
pub const SUCCESS_MESSAGE: &str = "Photo uploaded successfully!";

/// Notice and reset timing
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub success_notice: Duration,
    pub error_notice: Duration,
    /// Delay before the form clears itself after a successful upload
    pub reset_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            success_notice: Duration::from_secs(5),
            error_notice: Duration::from_secs(8),
            reset_delay: Duration::from_secs(2),
        }
    }
}

impl UploadSettings {
    /// Create UploadSettings from environment variables
    ///
    /// # Environment Variables
    /// - `UPLOAD_SUCCESS_NOTICE_MS`: success notice lifetime (default: 5000)
    /// - `UPLOAD_ERROR_NOTICE_MS`: error notice lifetime (default: 8000)
    /// - `UPLOAD_RESET_DELAY_MS`: delay before the form resets (default: 2000)
    pub fn from_env() -> Self {
        let millis = |name: &str, default: u64| {
            std::env::var(name)
                .unwrap_or_else(|_| default.to_string())
                .parse()
                .unwrap_or(default)
        };

        UploadSettings {
            success_notice: Duration::from_millis(millis("UPLOAD_SUCCESS_NOTICE_MS", 5000)),
            error_notice: Duration::from_millis(millis("UPLOAD_ERROR_NOTICE_MS", 8000)),
            reset_delay: Duration::from_millis(millis("UPLOAD_RESET_DELAY_MS", 2000)),
        }
    }
}

/// Result of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub object_name: String,
    pub image_url: String,
    /// When the caller should call [`UploadController::reset`]
    pub reset_after: Duration,
}

/// Controller behind the upload page
pub struct UploadController {
    storage: ObjectStorage,
    photos: PhotoRepository,
    sessions: SessionManager,
    settings: UploadSettings,
    selection: Option<SelectedFile>,
    preview: Option<String>,
    progress: Option<ProgressStage>,
    notice: Option<Notice>,
    submit_enabled: bool,
}

impl UploadController {
    pub fn new(
        storage: ObjectStorage,
        photos: PhotoRepository,
        sessions: SessionManager,
        settings: UploadSettings,
    ) -> Self {
        Self {
            storage,
            photos,
            sessions,
            settings,
            selection: None,
            preview: None,
            progress: None,
            notice: None,
            submit_enabled: true,
        }
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn progress(&self) -> Option<ProgressStage> {
        self.progress
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Validate and keep a chosen file, producing its preview
    pub fn select(&mut self, name: &str, content_type: &str, bytes: Vec<u8>) -> GalleryResult<()> {
        match SelectedFile::new(name, content_type, bytes) {
            Ok(file) => {
                debug!("Selected {} ({} bytes)", file.name(), file.size());
                self.accept(file);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected file {}: {}", name, e);
                self.clear_selection();
                Err(self.fail(e))
            }
        }
    }

    /// Keep a file that already passed validation
    pub fn accept(&mut self, file: SelectedFile) {
        self.preview = Some(file.preview_html());
        self.selection = Some(file);
    }

    /// Nothing selected: drop the file and its preview
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.preview = None;
    }

    /// Upload the selected image and save its details
    pub async fn submit(
        &mut self,
        form: &UploadForm,
        progress: &mut dyn ProgressSink,
    ) -> GalleryResult<UploadReceipt> {
        let Some(file) = self.selection.clone() else {
            return Err(self.fail(GalleryError::validation("Please select an image")));
        };
        if let Err(e) = form.validate() {
            return Err(self.fail(e));
        }

        self.submit_enabled = false;
        self.notice = None;
        self.report(progress, ProgressStage::Preparing);

        let token = self.sessions.access_token();
        let user_id = self.sessions.current_user().map(|user| user.id);
        let object_name = generate_object_name(file.name());

        self.report(progress, ProgressStage::Uploading);
        let uploaded = self
            .storage
            .upload(&object_name, &file, token.as_deref())
            .await;
        let image_url = match uploaded {
            Ok(url) => url,
            Err(e) => {
                error!("Image upload failed: {}", e);
                return Err(self.abort(e));
            }
        };

        self.report(progress, ProgressStage::Saving);
        let saved = match form.to_new_photo(image_url.clone(), user_id, Utc::now()) {
            Ok(photo) => self.photos.insert(&photo, token.as_deref()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = saved {
            error!("Saving photo details failed, {} left in storage: {}", object_name, e);
            return Err(self.abort(e));
        }

        self.report(progress, ProgressStage::Done);
        info!("Uploaded photo {}", image_url);

        self.notice = Some(Notice::success(SUCCESS_MESSAGE).hide_after(self.settings.success_notice));
        Ok(UploadReceipt {
            object_name,
            image_url,
            reset_after: self.settings.reset_delay,
        })
    }

    /// Back to a blank form with submit enabled
    pub fn reset(&mut self, form: &mut UploadForm) {
        form.reset();
        self.clear_selection();
        self.progress = None;
        self.notice = None;
        self.submit_enabled = true;
    }

    fn report(&mut self, sink: &mut dyn ProgressSink, stage: ProgressStage) {
        self.progress = Some(stage);
        sink.update(stage);
    }

    /// Failure after submit started: hide progress and re-enable submit
    fn abort(&mut self, err: GalleryError) -> GalleryError {
        self.progress = None;
        self.submit_enabled = true;
        self.fail(err)
    }

    fn fail(&mut self, err: GalleryError) -> GalleryError {
        self.notice = Some(Notice::from_error(&err).hide_after(self.settings.error_notice));
        err
    }
}
