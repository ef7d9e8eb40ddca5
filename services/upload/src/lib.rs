//! Photo upload
//!
//! Validates the selected image, stores it in object storage and records
//! its metadata row, reporting progress along the way.

pub mod controller;
pub mod form;
pub mod progress;
pub mod repository;
pub mod selection;
pub mod storage;

pub use controller::{UploadController, UploadReceipt, UploadSettings};
pub use form::{UploadForm, parse_tags};
pub use progress::{LogProgress, ProgressSink, ProgressStage};
pub use repository::PhotoRepository;
pub use selection::{MAX_FILE_SIZE, SelectedFile};
pub use storage::ObjectStorage;
