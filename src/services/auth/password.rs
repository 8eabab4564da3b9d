use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::info;

use super::{AuthService, normalize_email, otp::{consume_otp, send_code}};
use crate::models::{
    ErrorCode,
    auth::{
        entities::OtpPurpose,
        requests::{ChangePasswordRequest, ForgotPasswordRequest, ResetPasswordRequest},
    },
    users::requests::UpdateUserRequest,
};
use crate::services::{
    app_cache, bad_request, current_user, internal, invalid, ok_empty, reject, server_error,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

async fn store_password(
    service: &AuthService,
    request: &HttpRequest,
    user_id: i64,
    new_password: &str,
) -> ActixResult<()> {
    let storage = service.get_storage(request)?;
    let password_hash =
        hash_password(new_password).map_err(server_error("Failed to hash password"))?;
    storage
        .update_user(
            user_id,
            UpdateUserRequest {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await
        .map_err(internal("Failed to update password"))?;
    Ok(())
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        ));
    }
    validate_password(&change_request.new_password)
        .map_err(invalid(ErrorCode::UserPasswordInvalid))?;
    if change_request.new_password == change_request.current_password {
        return Err(bad_request(
            ErrorCode::UserPasswordInvalid,
            "New password must differ from the current one",
        ));
    }

    store_password(service, request, user.id, &change_request.new_password).await?;
    info!("User {} changed their password", user.id);
    ok_empty("Password changed")
}

pub async fn handle_forgot_password(
    service: &AuthService,
    forgot_request: ForgotPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    send_code(service, &forgot_request.email, OtpPurpose::Reset, request).await
}

pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = app_cache(request)?;
    let email = normalize_email(&reset_request.email);

    validate_password(&reset_request.new_password)
        .map_err(invalid(ErrorCode::UserPasswordInvalid))?;
    consume_otp(&cache, &email, OtpPurpose::Reset, &reset_request.code).await?;

    // a challenge is only issued for an existing account
    let user = storage
        .get_user_by_email(&email)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(|| bad_request(ErrorCode::OtpInvalid, "Verification code is incorrect"))?;

    store_password(service, request, user.id, &reset_request.new_password).await?;
    info!("Password reset for user {}", user.id);
    ok_empty("Password has been reset, you can now sign in")
}
