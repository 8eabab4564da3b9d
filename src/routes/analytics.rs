use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::users::entities::UserRole;
use crate::services::AnalyticsService;
use crate::utils::SafeStudentIdI64;

static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

pub async fn admin_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.admin_dashboard(&req).await
}

pub async fn teacher_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.teacher_dashboard(&req).await
}

pub async fn student_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.student_dashboard(&req).await
}

pub async fn student_dashboard_for(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .student_dashboard_for(&req, student_id.0)
        .await
}

pub fn configure_analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/analytics")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("/admin")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::get().to(admin_dashboard)),
            )
            .service(
                web::resource("/teacher")
                    .wrap(RequireRole::new(&UserRole::Teacher))
                    .route(web::get().to(teacher_dashboard)),
            )
            .service(
                web::resource("/student")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route(web::get().to(student_dashboard)),
            )
            .route(
                "/students/{student_id}",
                web::get().to(student_dashboard_for),
            ),
    );
}
