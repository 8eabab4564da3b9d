//! Local file storage for attachments and library books

pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::{Path, PathBuf};

define_service!(FileService);

impl FileService {
    pub async fn upload(&self, request: &HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn download(&self, request: &HttpRequest, token: String) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, token).await
    }
}

/// Lowercased extension with its leading dot, empty when there is none
pub(crate) fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Stored names never come from the client, so they stay inside `dir`
pub(crate) fn stored_path(dir: &str, stored_name: &str) -> PathBuf {
    Path::new(dir).join(stored_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Chapter 1.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_stored_path_stays_in_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let path = stored_path(dir_str, "3f2a.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    }
}
