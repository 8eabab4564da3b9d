//! Emailed one-time codes for registration and password reset
//!
//! A challenge lives in the object cache under `otp:{purpose}:{email}` until it
//! is used, expires or runs out of attempts. A second key remembers the last
//! send so codes cannot be requested faster than `otp.resend_cooldown`.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;
use tracing::{info, warn};

use super::{AuthService, login::login_success, normalize_email};
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::mail::{Mailer, OutgoingMail};
use crate::models::{
    ErrorCode,
    auth::{
        entities::{OtpChallenge, OtpCheck, OtpPurpose},
        requests::{ResendOtpRequest, VerifyOtpRequest},
        responses::OtpSentResponse,
    },
    users::{entities::UserStatus, requests::UpdateUserRequest},
};
use crate::services::{
    app_cache, app_mailer, bad_request, forbidden, internal, not_found, ok, reject,
};
use crate::utils::random_code::generate_otp;

/// Stores a fresh challenge, mails the code and then starts the resend cooldown.
/// Returns the seconds until the code expires.
pub(crate) async fn issue_otp(
    cache: &Arc<dyn ObjectCache>,
    mailer: &Arc<dyn Mailer>,
    email: &str,
    purpose: OtpPurpose,
) -> Result<i64> {
    let config = AppConfig::get();
    let now = chrono::Utc::now().timestamp();
    let ttl = config.otp.ttl.max(1);
    let challenge = OtpChallenge::new(generate_otp(config.otp.length), purpose, now, ttl);

    cache
        .insert_json(purpose.cache_key(email), &challenge, ttl as u64)
        .await;

    mailer
        .send(OutgoingMail::otp(
            email,
            purpose,
            &challenge.code,
            ttl,
            &config.app.system_name,
        ))
        .await?;

    // cooldown starts only once the code is delivered
    cache
        .insert_raw(
            purpose.cooldown_key(email),
            now.to_string(),
            config.otp.resend_cooldown.max(1) as u64,
        )
        .await;

    info!("Sent {} code to {}", purpose.as_str(), email);
    Ok(ttl)
}

/// Seconds left on the resend cooldown, if it is still running
async fn cooldown_remaining(
    cache: &Arc<dyn ObjectCache>,
    email: &str,
    purpose: OtpPurpose,
) -> Option<i64> {
    let CacheResult::Found(sent_at) = cache.get_raw(&purpose.cooldown_key(email)).await else {
        return None;
    };
    let sent_at: i64 = sent_at.parse().ok()?;
    let remaining = sent_at + AppConfig::get().otp.resend_cooldown - chrono::Utc::now().timestamp();
    (remaining > 0).then_some(remaining)
}

/// Checks `code` and consumes the challenge when it matches
pub(crate) async fn consume_otp(
    cache: &Arc<dyn ObjectCache>,
    email: &str,
    purpose: OtpPurpose,
    code: &str,
) -> ActixResult<()> {
    let key = purpose.cache_key(email);
    let Some(challenge) = cache.get_json::<OtpChallenge>(&key).await else {
        return Err(bad_request(
            ErrorCode::OtpExpired,
            "Verification code has expired or was never requested",
        ));
    };

    let now = chrono::Utc::now().timestamp();
    match challenge.check(code, now, AppConfig::get().otp.max_attempts) {
        OtpCheck::Valid => {
            cache.remove(&key).await;
            Ok(())
        }
        OtpCheck::Expired => {
            cache.remove(&key).await;
            Err(bad_request(
                ErrorCode::OtpExpired,
                "Verification code has expired, please request a new one",
            ))
        }
        OtpCheck::Mismatch(challenge) => {
            let ttl = challenge.remaining_ttl(now).max(1) as u64;
            cache.insert_json(key, &challenge, ttl).await;
            Err(bad_request(ErrorCode::OtpInvalid, "Verification code is incorrect"))
        }
        OtpCheck::Exhausted => {
            cache.remove(&key).await;
            warn!("OTP attempts exhausted for {}", email);
            Err(bad_request(
                ErrorCode::OtpInvalid,
                "Too many incorrect attempts, please request a new code",
            ))
        }
    }
}

pub async fn handle_verify_otp(
    service: &AuthService,
    verify_request: VerifyOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = app_cache(request)?;
    let email = normalize_email(&verify_request.email);

    consume_otp(&cache, &email, OtpPurpose::Register, &verify_request.code).await?;

    let user = storage
        .get_user_by_email(&email)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    let user = match user.status {
        UserStatus::Pending => storage
            .update_user(
                user.id,
                UpdateUserRequest {
                    status: Some(UserStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .map_err(internal("Failed to activate account"))?
            .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?,
        UserStatus::Suspended => {
            return Err(forbidden(
                ErrorCode::AccountSuspended,
                "This account has been suspended",
            ));
        }
        UserStatus::Active => user,
    };

    info!("Email verified for user {}", user.id);
    login_success(&storage, user, false, "Email verified").await
}

/// Sends a code for `purpose` unless the account does not qualify.
/// Unknown emails get the same answer as known ones.
pub(crate) async fn send_code(
    service: &AuthService,
    email: &str,
    purpose: OtpPurpose,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = app_cache(request)?;
    let mailer = app_mailer(request)?;
    let email = normalize_email(email);
    let config = service.get_config();

    let sent = OtpSentResponse {
        email: email.clone(),
        expires_in: config.otp.ttl,
    };

    let user = storage
        .get_user_by_email(&email)
        .await
        .map_err(internal("Failed to load user"))?;
    let qualifies = match (&user, purpose) {
        (Some(user), OtpPurpose::Register) => user.status == UserStatus::Pending,
        (Some(user), OtpPurpose::Reset) => user.status != UserStatus::Suspended,
        (None, _) => false,
    };
    if !qualifies {
        return ok(sent, "If the account exists, a code has been sent");
    }

    if let Some(remaining) = cooldown_remaining(&cache, &email, purpose).await {
        return Err(reject(
            StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::OtpCooldown,
            format!("Please wait {remaining} seconds before requesting another code"),
        ));
    }

    match issue_otp(&cache, &mailer, &email, purpose).await {
        Ok(expires_in) => ok(
            OtpSentResponse { email, expires_in },
            "If the account exists, a code has been sent",
        ),
        Err(e) => {
            warn!("Failed to mail {} code to {}: {}", purpose.as_str(), email, e);
            Err(reject(
                StatusCode::BAD_GATEWAY,
                ErrorCode::MailDeliveryFailed,
                "Failed to send the verification email, please try again later",
            ))
        }
    }
}

pub async fn handle_resend_otp(
    service: &AuthService,
    resend_request: ResendOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    send_code(service, &resend_request.email, resend_request.purpose, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::errors::DlmsError;
    use async_trait::async_trait;

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _mail: OutgoingMail) -> Result<()> {
            Err(DlmsError::mail("connection refused"))
        }
    }

    fn cache() -> Arc<dyn ObjectCache> {
        Arc::new(MokaCacheWrapper::with_settings(100, 60))
    }

    #[tokio::test]
    async fn test_failed_send_leaves_resend_open() {
        let cache = cache();
        let mailer: Arc<dyn Mailer> = Arc::new(FailingMailer);

        let result = issue_otp(&cache, &mailer, "abel@falcon.edu.et", OtpPurpose::Register).await;
        assert!(result.is_err());
        assert_eq!(
            cooldown_remaining(&cache, "abel@falcon.edu.et", OtpPurpose::Register).await,
            None
        );
    }

    #[tokio::test]
    async fn test_delivered_code_starts_cooldown() {
        let cache = cache();
        let mailer: Arc<dyn Mailer> = Arc::new(crate::mail::LogMailer);

        issue_otp(&cache, &mailer, "abel@falcon.edu.et", OtpPurpose::Reset)
            .await
            .unwrap();
        let remaining = cooldown_remaining(&cache, "abel@falcon.edu.et", OtpPurpose::Reset).await;
        assert!(remaining.is_some_and(|s| s > 0));
        // the register purpose has its own cooldown
        assert_eq!(
            cooldown_remaining(&cache, "abel@falcon.edu.et", OtpPurpose::Register).await,
            None
        );
    }

    #[tokio::test]
    async fn test_exhausted_challenge_is_destroyed() {
        let cache = cache();
        let email = "abel@falcon.edu.et";
        let challenge = OtpChallenge::new(
            "424242".to_string(),
            OtpPurpose::Register,
            chrono::Utc::now().timestamp(),
            600,
        );
        cache
            .insert_json(OtpPurpose::Register.cache_key(email), &challenge, 600)
            .await;

        for _ in 0..AppConfig::get().otp.max_attempts {
            assert!(consume_otp(&cache, email, OtpPurpose::Register, "000000").await.is_err());
        }
        // even the right code fails once the challenge is gone
        assert!(consume_otp(&cache, email, OtpPurpose::Register, "424242").await.is_err());
        assert!(
            cache
                .get_json::<OtpChallenge>(&OtpPurpose::Register.cache_key(email))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_matching_code_is_consumed_once() {
        let cache = cache();
        let email = "abel@falcon.edu.et";
        let challenge = OtpChallenge::new(
            "424242".to_string(),
            OtpPurpose::Reset,
            chrono::Utc::now().timestamp(),
            600,
        );
        cache
            .insert_json(OtpPurpose::Reset.cache_key(email), &challenge, 600)
            .await;

        assert!(consume_otp(&cache, email, OtpPurpose::Reset, "424242").await.is_ok());
        assert!(consume_otp(&cache, email, OtpPurpose::Reset, "424242").await.is_err());
    }
}
