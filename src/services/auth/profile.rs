use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::{
    ErrorCode,
    auth::{requests::UpdateProfileRequest, responses::UserInfoResponse},
    users::requests::UpdateUserRequest,
};
use crate::services::{app_cache, bad_request, current_user, internal, not_found, ok};
use crate::utils::jwt::JwtUtils;
use crate::utils::validate::{validate_full_name, validate_phone};

pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Some(ref full_name) = update_request.full_name {
        validate_full_name(full_name)
            .map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    }
    if let Some(ref phone) = update_request.phone
        && !phone.trim().is_empty()
    {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::UserUpdateFailed, msg))?;
    }

    let update = UpdateUserRequest {
        full_name: update_request.full_name.map(|n| n.trim().to_string()),
        phone: update_request.phone.map(|p| p.trim().to_string()),
        avatar_url: update_request.avatar_url,
        ..Default::default()
    };

    let updated = storage
        .update_user(user.id, update)
        .await
        .map_err(internal("Failed to update profile"))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    // the cached copy behind this token is now stale
    if let Some(token) = JwtUtils::extract_bearer(request) {
        app_cache(request)?.remove(&user_cache_key(&token)).await;
    }

    let profile = storage
        .get_account_profile(updated.id, updated.role)
        .await
        .map_err(internal("Failed to load account profile"))?;

    ok(
        UserInfoResponse {
            user: updated,
            profile,
        },
        "Profile updated",
    )
}
