/*!
 * Fixed-window rate limiting
 *
 * Counters live in an in-process moka cache keyed by
 * `prefix:user:{id}` for authenticated requests and `prefix:ip:{addr}`
 * otherwise. Endpoint presets carry a fixed budget; general API traffic uses
 * per-role tiers from `[rate_limit]`.
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .service(web::resource("/login").wrap(RateLimit::login()).route(web::post().to(login)))
 *
 * // apply inside RequireJWT so the role is known
 * web::scope("/api/v1/quizzes").wrap(RateLimit::api()).wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::config::{AppConfig, RateLimitConfig};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// Window start (unix seconds) and requests counted in it
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: u64,
    count: u32,
}

// Entries outlive any configured window; stale windows are reset on access
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

/// Requests allowed per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Budget {
    Fixed(u32),
    /// Looked up from `[rate_limit]` by the caller's role
    RoleTier,
}

#[derive(Debug, Clone)]
pub struct RateLimit {
    budget: Budget,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            budget: Budget::Fixed(max_requests),
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 5 per minute
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 3 per minute
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 5 per minute, shared by OTP verification, resend and password reset
    pub fn otp() -> Self {
        Self::new(5, 60).with_prefix("otp")
    }

    /// 10 per minute
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 10 per minute
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }

    /// Role-tiered budget for general API traffic
    pub fn api() -> Self {
        Self {
            budget: Budget::RoleTier,
            window_secs: AppConfig::get().rate_limit.window_secs,
            key_prefix: "api".to_string(),
        }
    }
}

/// Budget of a role tier; `None` is an anonymous caller
pub fn tier_limit(config: &RateLimitConfig, role: Option<UserRole>) -> u32 {
    match role {
        None => config.anonymous,
        Some(UserRole::Student) => config.student,
        Some(UserRole::Parent) => config.parent,
        Some(UserRole::Teacher) => config.teacher,
        Some(UserRole::Admin) => config.admin,
    }
}

/// Outcome of counting one request
#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: u64 },
}

/// Counts a request against `window`, returning the updated window
fn count_request(
    window: Option<Window>,
    now: u64,
    limit: u32,
    window_secs: u64,
) -> (Window, Decision) {
    let window = match window {
        Some(w) if now < w.started_at + window_secs => w,
        _ => Window {
            started_at: now,
            count: 0,
        },
    };

    if window.count >= limit {
        let retry_after = (window.started_at + window_secs).saturating_sub(now).max(1);
        return (window, Decision::Limited { retry_after });
    }

    let window = Window {
        count: window.count + 1,
        ..window
    };
    let remaining = limit.saturating_sub(window.count);
    (window, Decision::Allowed { remaining })
}

fn extract_client_ip(req: &ServiceRequest) -> String {
    // realip_remote_addr honors Forwarded / X-Forwarded-For; validate before trusting it
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn create_rate_limit_response(retry_after: u64, limit: u32) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Limit", limit.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let caller = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.role));

            let identifier = match caller {
                Some((id, _)) => format!("user:{id}"),
                None => format!("ip:{}", extract_client_ip(&req)),
            };
            let cache_key = if policy.key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", policy.key_prefix, identifier)
            };

            let limit = match policy.budget {
                Budget::Fixed(limit) => limit,
                Budget::RoleTier => tier_limit(&AppConfig::get().rate_limit, caller.map(|c| c.1)),
            };

            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let current = RATE_LIMIT_CACHE.get(&cache_key).await;
            let (window, decision) = count_request(current, now, limit, policy.window_secs);
            RATE_LIMIT_CACHE.insert(cache_key.clone(), window).await;

            match decision {
                Decision::Limited { retry_after } => {
                    warn!(
                        "Rate limit exceeded for {} ({}/{} per {}s)",
                        cache_key, window.count, limit, policy.window_secs
                    );
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after, limit).map_into_right_body(),
                    ))
                }
                Decision::Allowed { remaining } => {
                    let mut res = srv.call(req).await?;
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-limit"),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.budget, Budget::Fixed(5));
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::register().budget, Budget::Fixed(3));
        assert_eq!(RateLimit::otp().budget, Budget::Fixed(5));
        assert_eq!(RateLimit::refresh_token().budget, Budget::Fixed(10));
        assert_eq!(RateLimit::file_upload().budget, Budget::Fixed(10));
        assert_eq!(RateLimit::api().budget, Budget::RoleTier);
    }

    #[test]
    fn test_role_tiers() {
        let config = &AppConfig::get().rate_limit;
        assert_eq!(tier_limit(config, None), 30);
        assert_eq!(tier_limit(config, Some(UserRole::Student)), 100);
        assert_eq!(tier_limit(config, Some(UserRole::Parent)), 100);
        assert_eq!(tier_limit(config, Some(UserRole::Teacher)), 200);
        assert_eq!(tier_limit(config, Some(UserRole::Admin)), 300);
    }

    #[test]
    fn test_fixed_window() {
        let (w, d) = count_request(None, 1000, 2, 60);
        assert_eq!(d, Decision::Allowed { remaining: 1 });
        let (w, d) = count_request(Some(w), 1010, 2, 60);
        assert_eq!(d, Decision::Allowed { remaining: 0 });
        let (w, d) = count_request(Some(w), 1030, 2, 60);
        assert_eq!(d, Decision::Limited { retry_after: 30 });
        // next window starts fresh
        let (_, d) = count_request(Some(w), 1060, 2, 60);
        assert_eq!(d, Decision::Allowed { remaining: 1 });
    }

    #[actix_web::test]
    async fn test_limit_returns_429_with_retry_after() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(1, 60).with_prefix("test_limited"))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/limited").to_request()).await;
        assert!(first.status().is_success());

        let second = test::call_service(&app, test::TestRequest::get().uri("/limited").to_request()).await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("retry-after"));
    }
}
