//! Upload constraints: size cap and extension allow-list.

use std::path::Path;

use atelier_model::UploadPolicy;

use crate::error::{GalleryError, Result};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn policy() -> UploadPolicy {
    UploadPolicy {
        max_bytes: MAX_UPLOAD_BYTES,
        allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    }
}

/// Check the declared name and size of an upload against the policy.
pub fn validate_upload(file_name: &str, byte_len: usize) -> Result<()> {
    if byte_len > MAX_UPLOAD_BYTES {
        return Err(GalleryError::validation(
            "file",
            "File size must be less than 5 MiB.",
        ));
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(GalleryError::validation(
            "file",
            "Only image files (jpg, jpeg, png, gif, webp) are allowed.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: GalleryError) -> &'static str {
        match err {
            GalleryError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_all_allowed_extensions() {
        for ext in ALLOWED_EXTENSIONS {
            assert!(validate_upload(&format!("art.{ext}"), 1024).is_ok());
        }
    }

    #[test]
    fn accepts_uppercase_extension() {
        assert!(validate_upload("SCAN1.JPG", 2 * 1024 * 1024).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        let err = validate_upload("big.png", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(field_of(err), "file");
    }

    #[test]
    fn accepts_file_at_exact_limit() {
        assert!(validate_upload("exact.png", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn rejects_executable_extension() {
        let err = validate_upload("malware.exe", 1024).unwrap_err();
        assert_eq!(field_of(err), "file");
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(validate_upload("noextension", 1024).is_err());
    }

    #[test]
    fn extension_is_taken_from_the_last_dot() {
        assert!(validate_upload("archive.png.exe", 1024).is_err());
        assert!(validate_upload("photo.final.jpeg", 1024).is_ok());
    }
}
