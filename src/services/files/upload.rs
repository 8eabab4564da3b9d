use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use super::{FileService, extension_of, stored_path};
use crate::config::AppConfig;
use crate::models::{ErrorCode, files::responses::FileUploadResponse};
use crate::services::{bad_request, created, current_user, internal, reject};
use crate::utils::random_code::generate_token;
use crate::utils::validate_magic_bytes;

const DOWNLOAD_TOKEN_LEN: usize = 32;

fn upload_failed(context: &str) -> actix_web::Error {
    reject(
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::FileUploadFailed,
        context.to_string(),
    )
}

/// Removes a partly written file and returns `err`
fn discard(path: &Path, err: actix_web::Error) -> actix_web::Error {
    if let Err(e) = fs::remove_file(path) {
        error!("Failed to remove rejected upload {}: {}", path.display(), e);
    }
    err
}

/// One `file` field per request. The extension must be allowed, the first
/// chunk must match it and the total size must stay within the limit.
pub async fn handle_upload(
    service: &FileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    if let Err(e) = fs::create_dir_all(upload_dir) {
        error!("Failed to create upload directory {}: {}", upload_dir, e);
        return Err(upload_failed("Failed to prepare upload directory"));
    }

    let mut upload: Option<(String, String, String, i64)> = None;

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        if disposition.and_then(|cd| cd.get_name()) != Some("file") {
            continue;
        }
        if upload.is_some() {
            return Err(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = disposition
            .and_then(|cd| cd.get_filename())
            .map(|name| name.trim().to_string())
            .unwrap_or_default();
        let extension = extension_of(&original_name);
        if original_name.is_empty()
            || !config
                .upload
                .allowed_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&extension))
        {
            return Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                format!(
                    "File type not allowed, accepted: {}",
                    config.upload.allowed_types.join(", ")
                ),
            ));
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let stored_name = format!("{}{}", Uuid::new_v4(), extension);
        let path = stored_path(upload_dir, &stored_name);
        let mut file = File::create(&path).map_err(|e| {
            error!("Failed to create {}: {}", path.display(), e);
            upload_failed("Failed to store file")
        })?;

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => return Err(discard(&path, e.into())),
            };
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    return Err(discard(
                        &path,
                        bad_request(
                            ErrorCode::FileTypeNotAllowed,
                            "File content does not match its extension",
                        ),
                    ));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                return Err(discard(
                    &path,
                    bad_request(
                        ErrorCode::FileSizeExceeded,
                        format!("File exceeds the {max_size} byte limit"),
                    ),
                ));
            }
            if let Err(e) = file.write_all(&data) {
                error!("Failed to write {}: {}", path.display(), e);
                return Err(discard(&path, upload_failed("Failed to store file")));
            }
        }

        if total_size == 0 {
            return Err(discard(
                &path,
                bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty"),
            ));
        }
        upload = Some((original_name, stored_name, content_type, total_size as i64));
    }

    let Some((original_name, stored_name, content_type, size)) = upload else {
        return Err(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    let token = generate_token(DOWNLOAD_TOKEN_LEN);
    let file = match storage
        .create_file(&token, &original_name, &stored_name, size, &content_type, user.id)
        .await
    {
        Ok(file) => file,
        Err(e) => {
            let path = stored_path(upload_dir, &stored_name);
            return Err(discard(&path, internal("Failed to record file")(e)));
        }
    };

    info!(
        "User {} uploaded {} ({} bytes) as {}",
        user.id, file.original_name, file.file_size, file.stored_name
    );
    created(
        FileUploadResponse {
            download_token: file.download_token,
            file_name: file.original_name,
            size: file.file_size,
            content_type: file.file_type,
            uploaded_at: file.uploaded_at,
        },
        "File uploaded",
    )
}
