use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{
    ErrorCode,
    users::{entities::UserRole, requests::UpdateUserRequest, responses::UserDetailResponse},
};
use crate::services::{
    bad_request, current_user, internal, invalid, not_found, ok, server_error, storage_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_password, validate_phone};

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let existing = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    // a student keeps a FAV ID and placement, so the role is fixed in both directions
    if let Some(role) = update_data.role
        && role != existing.role
        && (role == UserRole::Student || existing.role == UserRole::Student)
    {
        return Err(bad_request(
            ErrorCode::UserUpdateFailed,
            "Student accounts cannot change role",
        ));
    }

    if let Some(ref email) = update_data.email {
        let email = email.trim().to_lowercase();
        validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
        update_data.email = Some(email);
    }
    if let Some(ref full_name) = update_data.full_name {
        validate_full_name(full_name)
            .map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    }
    if let Some(ref phone) = update_data.phone
        && !phone.trim().is_empty()
    {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::UserUpdateFailed, msg))?;
    }
    if let Some(password) = update_data.password.take() {
        validate_password(&password).map_err(invalid(ErrorCode::UserPasswordInvalid))?;
        update_data.password =
            Some(hash_password(&password).map_err(server_error("Failed to hash password"))?);
    }

    let user = storage
        .update_user(user_id, update_data)
        .await
        .map_err(storage_error(
            "An account with this email",
            ErrorCode::UserEmailAlreadyExists,
        ))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    let profile = storage
        .get_account_profile(user.id, user.role)
        .await
        .map_err(internal("Failed to load account profile"))?;

    info!("Admin {} updated user {}", admin.id, user.id);
    ok(UserDetailResponse { user, profile }, "User updated")
}
