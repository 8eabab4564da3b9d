use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{AuthService, normalize_email};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::{User, UserStatus},
};
use crate::services::{forbidden, internal, reject};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn auth_failed() -> actix_web::Error {
    reject(
        StatusCode::UNAUTHORIZED,
        ErrorCode::AuthFailed,
        "Email, FAV ID or password is incorrect",
    )
}

/// Rejects accounts that may not sign in
pub(crate) fn ensure_can_sign_in(user: &User) -> ActixResult<()> {
    match user.status {
        UserStatus::Active => Ok(()),
        UserStatus::Pending => Err(forbidden(
            ErrorCode::EmailNotVerified,
            "Email address has not been verified",
        )),
        UserStatus::Suspended => Err(forbidden(
            ErrorCode::AccountSuspended,
            "This account has been suspended",
        )),
    }
}

/// Issues the token pair for an active account: access token in the body,
/// refresh token in an http-only cookie
pub(crate) async fn login_success(
    storage: &Arc<dyn Storage>,
    user: User,
    remember_me: bool,
    message: &str,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    let tokens = user
        .generate_access_token()
        .and_then(|access| Ok((access, user.generate_refresh_token(remember_me)?)));
    let (access_token, refresh_token) = tokens.map_err(|e| {
        error!("Failed to generate JWT for user {}: {}", user.id, e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Login failed, unable to generate token",
        )
    })?;

    let profile = storage
        .get_account_profile(user.id, user.role)
        .await
        .map_err(internal("Failed to load account profile"))?;

    let response = LoginResponse {
        access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        profile,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_refresh_token_cookie(
            &refresh_token,
            remember_me,
        ))
        .json(ApiResponse::success(response, message)))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // FAV IDs are upper case, emails are matched lowercased
    let identifier = login_request.identifier.trim();
    let identifier = if identifier.contains('@') {
        normalize_email(identifier)
    } else {
        identifier.to_uppercase()
    };

    let user = storage
        .get_user_by_identifier(&identifier)
        .await
        .map_err(internal("Login failed"))?
        .ok_or_else(auth_failed)?;

    if !verify_password(&login_request.password, &user.password_hash) {
        return Err(auth_failed());
    }
    ensure_can_sign_in(&user)?;

    info!("User {} logged in", user.id);
    login_success(&storage, user, login_request.remember_me, "Login successful").await
}
