use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::grades::requests::{GradeListParams, RecordGradeRequest, ReportCardParams};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn record_grade(
    req: HttpRequest,
    body: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grade(&req, body.into_inner()).await
}

pub async fn list_for_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_for_student(&req, student_id.0, query.into_inner())
        .await
}

pub async fn report_card(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ReportCardParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .report_card(&req, student_id.0, query.into_inner())
        .await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(&req, id.0).await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::post().to(record_grade)),
            )
            .route("/students/{student_id}", web::get().to(list_for_student))
            .route(
                "/students/{student_id}/report-card",
                web::get().to(report_card),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::delete().to(delete_grade)),
            ),
    );
}
