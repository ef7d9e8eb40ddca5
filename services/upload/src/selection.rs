//! Selected image file and its local preview

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{GalleryError, GalleryResult};
use mime::Mime;

/// Largest accepted image: 5 MiB
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// An image accepted for upload
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Validate a candidate file: it must be `image/*` and at most [`MAX_FILE_SIZE`]
    pub fn new(name: impl Into<String>, content_type: &str, bytes: Vec<u8>) -> GalleryResult<Self> {
        let content_type = check_image_type(content_type)?;
        check_size(bytes.len() as u64)?;

        Ok(SelectedFile {
            name: name.into(),
            content_type,
            bytes,
        })
    }

    /// Read a file from disk, taking the content type from its extension
    ///
    /// Type and size are checked before the contents are read.
    pub fn from_path(path: &Path) -> GalleryResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = check_image_type(content_type_for(&name).as_ref())?;

        let read_error = |e: std::io::Error| {
            GalleryError::validation(format!("Failed to read {}: {}", path.display(), e))
        };
        check_size(std::fs::metadata(path).map_err(read_error)?.len())?;
        let bytes = std::fs::read(path).map_err(read_error)?;

        Self::new(name, &content_type, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared content type, as given at selection
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Text after the last `.` of the name, if any
    pub fn extension(&self) -> Option<&str> {
        file_extension(&self.name)
    }

    /// Preview markup with the image inlined as a `data:` URL
    pub fn preview_html(&self) -> String {
        format!(
            "<img src=\"data:{};base64,{}\" alt=\"Preview\">",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Accept any declared type whose top level is `image`, even one `Mime` cannot parse
fn check_image_type(content_type: &str) -> GalleryResult<String> {
    let content_type = content_type.trim();
    let is_image = content_type
        .split_once('/')
        .is_some_and(|(top, _)| top.trim().eq_ignore_ascii_case(mime::IMAGE.as_str()));

    if is_image {
        Ok(content_type.to_string())
    } else {
        Err(GalleryError::validation("Please select a valid image file"))
    }
}

fn check_size(len: u64) -> GalleryResult<()> {
    if len > MAX_FILE_SIZE as u64 {
        return Err(GalleryError::validation(
            "The image is too large. Maximum size: 5MB",
        ));
    }
    Ok(())
}

/// Text after the last `.`; `None` without a dot or with nothing after it
pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Content type inferred from a file name's extension
pub fn content_type_for(name: &str) -> Mime {
    let ext = file_extension(name).map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some(other @ ("webp" | "avif" | "tiff" | "ico")) => {
            let subtype = if other == "ico" { "x-icon" } else { other };
            format!("image/{}", subtype)
                .parse()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM)
        }
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
