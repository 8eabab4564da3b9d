use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{debug, error};

use super::{AuthService, login::ensure_can_sign_in};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
};
use crate::services::{current_user, internal, ok};
use crate::utils::jwt::JwtUtils;

/// 401 that also clears the refresh cookie
fn refresh_rejected(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(refresh_rejected("Refresh token missing"));
    };

    let user_id = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims.user_id(),
        Err(e) => {
            debug!("Rejected refresh token: {}", e);
            None
        }
    };
    let Some(user_id) = user_id else {
        return Ok(refresh_rejected("Invalid or expired refresh token"));
    };

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to load user"))?;
    let Some(user) = user else {
        return Ok(refresh_rejected("Account no longer exists"));
    };
    if ensure_can_sign_in(&user).is_err() {
        return Ok(refresh_rejected("Account is not active"));
    }

    match user.generate_access_token() {
        Ok(access_token) => ok(
            RefreshTokenResponse {
                access_token,
                expires_in: service.get_config().jwt.access_token_expiry * 60,
            },
            "Token refreshed",
        ),
        Err(e) => {
            error!("Failed to generate access token for user {}: {}", user.id, e);
            Err(crate::services::reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Unable to refresh token",
            ))
        }
    }
}

pub async fn handle_verify_token(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let is_valid = JwtUtils::extract_bearer(request)
        .is_some_and(|token| JwtUtils::verify_access_token(&token).is_ok());
    ok(TokenVerificationResponse { is_valid }, "Token checked")
}

pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let profile = storage
        .get_account_profile(user.id, user.role)
        .await
        .map_err(internal("Failed to load account profile"))?;

    ok(UserInfoResponse { user, profile }, "User information")
}
