//! Business rules between the HTTP routes and storage
//!
//! Each service resolves its storage from app data on first use, checks who
//! may do what, and renders results in the response envelope. Failures are
//! returned as `actix_web::Error` values that already carry the envelope, so
//! handlers can use `?` throughout.

/// Declares a service holding an optional storage handle.
/// Without one, storage is taken from the request's app data.
macro_rules! define_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub fn with_storage(storage: std::sync::Arc<dyn $crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => $crate::services::app_data::<dyn $crate::storage::Storage>(
                        request, "storage",
                    ),
                }
            }
        }
    };
}

pub mod academics;
pub mod access;
pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod files;
pub mod grades;
pub mod library;
pub mod messages;
pub mod news;
pub mod parents;
pub mod quizzes;
pub mod submissions;
pub mod users;

pub use academics::AcademicsService;
pub use analytics::AnalyticsService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use grades::GradeService;
pub use library::LibraryService;
pub use messages::MessageService;
pub use news::NewsService;
pub use parents::ParentService;
pub use quizzes::QuizService;
pub use submissions::SubmissionService;
pub use users::UserService;

use actix_web::{
    Error, HttpRequest, HttpResponse, Result as ActixResult, error::InternalError,
    http::StatusCode,
};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::DlmsError;
use crate::mail::Mailer;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// Shared handle registered with `web::Data<Arc<T>>`
pub(crate) fn app_data<T: ?Sized + 'static>(
    request: &HttpRequest,
    name: &str,
) -> ActixResult<Arc<T>> {
    request
        .app_data::<actix_web::web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("{} missing from app data", name);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Service unavailable",
            )
        })
}

pub(crate) fn app_cache(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    app_data::<dyn ObjectCache>(request, "cache")
}

pub(crate) fn app_mailer(request: &HttpRequest) -> ActixResult<Arc<dyn Mailer>> {
    app_data::<dyn Mailer>(request, "mailer")
}

/// Error carrying an envelope response
pub(crate) fn reject(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Error {
    let message = message.into();
    let response = HttpResponse::build(status).json(ApiResponse::error_empty(code, &message));
    InternalError::from_response(message, response).into()
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> Error {
    reject(StatusCode::BAD_REQUEST, code, message)
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> Error {
    reject(StatusCode::FORBIDDEN, code, message)
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> Error {
    reject(StatusCode::NOT_FOUND, code, message)
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> Error {
    reject(StatusCode::CONFLICT, code, message)
}

/// Maps a storage failure: conflicts stay 409 under `conflict_code`,
/// validation 400, missing rows 404, everything else is logged as a 500
pub(crate) fn storage_error(
    context: &'static str,
    conflict_code: ErrorCode,
) -> impl FnOnce(DlmsError) -> Error {
    move |e| match e {
        DlmsError::Conflict(_) => conflict(conflict_code, format!("{context}: already exists")),
        DlmsError::Validation(msg) => bad_request(ErrorCode::BadRequest, msg),
        DlmsError::NotFound(msg) => not_found(ErrorCode::NotFound, msg),
        other => {
            error!("{}: {}", context, other);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                context,
            )
        }
    }
}

/// `storage_error` for calls that cannot hit a unique index
pub(crate) fn internal(context: &'static str) -> impl FnOnce(DlmsError) -> Error {
    storage_error(context, ErrorCode::Conflict)
}

/// Account placed in the request by `RequireJWT`
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Authentication required",
        )
    })
}

pub(crate) fn ok<T: serde::Serialize + ts_rs::TS>(
    data: T,
    message: &str,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(data, message)))
}

pub(crate) fn created<T: serde::Serialize + ts_rs::TS>(
    data: T,
    message: &str,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Created().json(ApiResponse::success(data, message)))
}

pub(crate) fn ok_empty(message: &str) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
}

/// Validation message from a model check as a 400
pub(crate) fn invalid(code: ErrorCode) -> impl FnOnce(String) -> Error {
    move |msg| bad_request(code, msg)
}

/// Logs any failure and answers 500
pub(crate) fn server_error<E: std::fmt::Display>(
    context: &'static str,
) -> impl FnOnce(E) -> Error {
    move |e| {
        error!("{}: {}", context, e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            context,
        )
    }
}
