use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::academics::requests::{
    CreateTeacherAssignmentRequest, StudentListParams, TeacherAssignmentListParams,
    UpdatePlacementRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicsService;
use crate::utils::SafeIDI64;

static ACADEMICS_SERVICE: Lazy<AcademicsService> = Lazy::new(AcademicsService::new_lazy);

pub async fn taxonomy() -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.taxonomy().await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_student(&req, student_id.0).await
}

pub async fn get_student_by_fav_id(
    req: HttpRequest,
    fav_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_student_by_fav_id(&req, &fav_id).await
}

pub async fn update_placement(
    req: HttpRequest,
    student_id: SafeIDI64,
    body: web::Json<UpdatePlacementRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_placement(&req, student_id.0, body.into_inner())
        .await
}

pub async fn create_teacher_assignment(
    req: HttpRequest,
    body: web::Json<CreateTeacherAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_teacher_assignment(&req, body.into_inner())
        .await
}

pub async fn list_teacher_assignments(
    req: HttpRequest,
    query: web::Query<TeacherAssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .list_teacher_assignments(&req, query.into_inner())
        .await
}

pub async fn delete_teacher_assignment(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_teacher_assignment(&req, id.0).await
}

pub fn configure_academics_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/academics/taxonomy", web::get().to(taxonomy))
        .service(
            web::scope("/api/v1/students")
                .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                .wrap(RateLimit::api())
                .wrap(RequireJWT)
                .route("", web::get().to(list_students))
                .route("/fav/{fav_id}", web::get().to(get_student_by_fav_id))
                .route("/{id}", web::get().to(get_student))
                .service(
                    web::resource("/{id}/placement")
                        .wrap(RequireRole::new_any(UserRole::admin_roles()))
                        .route(web::put().to(update_placement)),
                ),
        )
        .service(
            web::scope("/api/v1/teacher-assignments")
                .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                .wrap(RateLimit::api())
                .wrap(RequireJWT)
                .service(
                    web::resource("")
                        .route(web::get().to(list_teacher_assignments))
                        .route(
                            web::post()
                                .to(create_teacher_assignment)
                                .wrap(RequireRole::new_any(UserRole::admin_roles())),
                        ),
                )
                .service(
                    web::resource("/{id}")
                        .wrap(RequireRole::new_any(UserRole::admin_roles()))
                        .route(web::delete().to(delete_teacher_assignment)),
                ),
        );
}
