use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn list_mine(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_mine(&req, query.into_inner()).await
}

pub async fn list_for_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_for_student(&req, student_id.0, query.into_inner())
        .await
}

pub async fn get_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, id.0).await
}

pub async fn grade(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.grade(&req, id.0, body.into_inner()).await
}

pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("/mine")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route(web::get().to(list_mine)),
            )
            .route("/students/{student_id}", web::get().to(list_for_student))
            .route("/{id}", web::get().to(get_submission))
            .service(
                web::resource("/{id}/grade")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(grade)),
            ),
    );
}
