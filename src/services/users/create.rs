use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{
    ErrorCode,
    users::{
        entities::UserStatus,
        requests::{CreateUserRequest, NewUser},
        responses::UserDetailResponse,
    },
};
use crate::services::{bad_request, created, current_user, internal, invalid, server_error, storage_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_password, validate_phone};

/// Admin-created accounts skip email verification
pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let email = user_data.email.trim().to_lowercase();
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_password(&user_data.password).map_err(invalid(ErrorCode::UserPasswordInvalid))?;
    validate_full_name(&user_data.full_name)
        .map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    let phone = user_data
        .phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    if let Some(ref phone) = phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::UserCreationFailed, msg))?;
    }
    let profile = user_data
        .profile
        .into_profile(user_data.role)
        .map_err(invalid(ErrorCode::InvalidPlacement))?;

    let password_hash =
        hash_password(&user_data.password).map_err(server_error("Failed to hash password"))?;

    let (user, _) = storage
        .create_user_with_profile(
            NewUser {
                email,
                password_hash,
                full_name: user_data.full_name.trim().to_string(),
                phone,
                role: user_data.role,
                status: UserStatus::Active,
            },
            profile,
        )
        .await
        .map_err(storage_error(
            "An account with this email",
            ErrorCode::UserEmailAlreadyExists,
        ))?;

    info!("Admin {} created {} account {}", admin.id, user.role, user.id);

    let profile = storage
        .get_account_profile(user.id, user.role)
        .await
        .map_err(internal("Failed to load account profile"))?;
    created(UserDetailResponse { user, profile }, "User created")
}
