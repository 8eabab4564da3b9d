use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult,
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
};
use tracing::error;

use super::{FileService, stored_path};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::services::{internal, not_found, reject};

/// Streams the stored bytes back under the original file name
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let file = storage
        .get_file_by_token(&token)
        .await
        .map_err(internal("Failed to load file"))?
        .ok_or_else(|| not_found(ErrorCode::FileNotFound, "File not found"))?;

    let path = stored_path(&AppConfig::get().upload.dir, &file.stored_name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("File {} is recorded but missing on disk", path.display());
            return Err(not_found(ErrorCode::FileNotFound, "File not found"));
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Err(reject(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to read file",
            ));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.original_name)],
        })
        .body(bytes))
}
