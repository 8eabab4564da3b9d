use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AuthService, normalize_email, otp::issue_otp};
use crate::models::{
    ErrorCode,
    auth::{entities::OtpPurpose, requests::RegisterRequest, responses::RegisterResponse},
    users::{entities::UserStatus, requests::NewUser},
};
use crate::services::{
    app_cache, app_mailer, bad_request, created, forbidden, invalid, server_error, storage_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_password, validate_phone};

/// Self-registration: a pending account plus its role profile, then an
/// emailed code that activates it
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = app_cache(request)?;
    let mailer = app_mailer(request)?;

    let RegisterRequest {
        email,
        password,
        full_name,
        phone,
        role,
        profile,
    } = register_request;

    if !role.is_self_registrable() {
        return Err(forbidden(
            ErrorCode::RegisterFailed,
            "Administrator accounts cannot be self-registered",
        ));
    }

    let email = normalize_email(&email);
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_password(&password).map_err(invalid(ErrorCode::UserPasswordInvalid))?;
    validate_full_name(&full_name).map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    let phone = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
    if let Some(ref phone) = phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::RegisterFailed, msg))?;
    }
    let profile = profile
        .into_profile(role)
        .map_err(invalid(ErrorCode::InvalidPlacement))?;

    let password_hash =
        hash_password(&password).map_err(server_error("Failed to hash password"))?;

    let (user, student) = storage
        .create_user_with_profile(
            NewUser {
                email: email.clone(),
                password_hash,
                full_name: full_name.trim().to_string(),
                phone,
                role,
                status: UserStatus::Pending,
            },
            profile,
        )
        .await
        .map_err(storage_error(
            "An account with this email",
            ErrorCode::UserEmailAlreadyExists,
        ))?;

    info!("Registered {} account {} ({})", user.role, user.id, user.email);

    // The account stays usable without the mail; the code can be resent
    let otp_expires_in = match issue_otp(&cache, &mailer, &email, OtpPurpose::Register).await {
        Ok(ttl) => ttl,
        Err(e) => {
            warn!("Failed to send verification code to {}: {}", email, e);
            0
        }
    };

    created(
        RegisterResponse {
            user,
            fav_id: student.map(|s| s.fav_id),
            otp_expires_in,
        },
        "Registration successful, check your email for the verification code",
    )
}
