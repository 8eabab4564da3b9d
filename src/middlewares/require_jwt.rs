/*!
 * Bearer token authentication
 *
 * Validates `Authorization: Bearer <access token>`, loads the account (cache
 * first, then storage) and places the `User` in the request extensions.
 * Accounts that are not `active` are rejected even with a valid token.
 *
 * ```rust,ignore
 * web::scope("/api/v1/messages")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(inbox));
 *
 * async fn inbox(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::extract_user(&req);
 *     // ...
 * }
 * ```
 */

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// Cache key of the account behind an access token
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// Why a request was turned away
struct Rejection {
    code: ErrorCode,
    status: StatusCode,
    message: &'static str,
}

impl Rejection {
    fn unauthorized(message: &'static str) -> Self {
        Self {
            code: ErrorCode::Unauthorized,
            status: StatusCode::UNAUTHORIZED,
            message,
        }
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, Rejection> {
    let token = JwtUtils::extract_bearer(req.request())
        .ok_or_else(|| Rejection::unauthorized("Missing or invalid Authorization header"))?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("Access token rejected: {}", err);
        Rejection::unauthorized("Invalid or expired access token")
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let key = user_cache_key(&token);

    let cached = match &cache {
        Some(cache) => cache.get_json::<User>(&key).await,
        None => None,
    };

    let user = match cached {
        Some(user) => user,
        None => {
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
                .ok_or_else(|| {
                    warn!("Storage missing from app data");
                    Rejection::unauthorized("Authentication unavailable")
                })?;
            let user_id = claims
                .user_id()
                .ok_or_else(|| Rejection::unauthorized("Invalid subject in access token"))?;

            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|e| {
                    warn!("Failed to load user {}: {}", user_id, e);
                    Rejection::unauthorized("Failed to load account")
                })?
                .ok_or_else(|| Rejection::unauthorized("Account no longer exists"))?;

            if let Some(cache) = &cache {
                cache
                    .insert_json(key, &user, AppConfig::get().cache.default_ttl)
                    .await;
            }
            user
        }
    };

    match user.status {
        UserStatus::Active => Ok(user),
        UserStatus::Pending => Err(Rejection {
            code: ErrorCode::EmailNotVerified,
            status: StatusCode::FORBIDDEN,
            message: "Email address not verified",
        }),
        UserStatus::Suspended => Err(Rejection {
            code: ErrorCode::AccountSuspended,
            status: StatusCode::FORBIDDEN,
            message: "Account suspended",
        }),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS preflight
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authenticated user {} ({})", user.id, user.role);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(rejection) => {
                    info!(
                        "Authentication failed for {}: {}",
                        req.path(),
                        rejection.message
                    );
                    Ok(req.into_response(
                        create_error_response(rejection.status, rejection.code, rejection.message)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// Authenticated account; only valid behind this middleware
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }
}
