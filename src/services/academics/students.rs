use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::{
    ErrorCode,
    academics::{
        requests::{StudentListParams, StudentListQuery, UpdatePlacementRequest},
        taxonomy::{FavId, validate_placement},
    },
};
use crate::services::{access, bad_request, current_user, internal, not_found, ok};

pub async fn list_students(
    service: &AcademicsService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let students = storage
        .list_students(StudentListQuery::from(query))
        .await
        .map_err(internal("Failed to list students"))?;

    ok(students, "Students retrieved")
}

pub async fn get_student(
    service: &AcademicsService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = access::student_summary(&storage, student_id).await?;
    ok(student, "Student retrieved")
}

pub async fn get_student_by_fav_id(
    service: &AcademicsService,
    request: &HttpRequest,
    fav_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let fav_id = FavId::parse(&fav_id.trim().to_uppercase())
        .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    let student = storage
        .get_student_by_fav_id(&fav_id)
        .await
        .map_err(internal("Failed to load student"))?
        .ok_or_else(|| {
            not_found(
                ErrorCode::StudentNotFound,
                format!("No student with FAV ID {fav_id}"),
            )
        })?;

    ok(student, "Student retrieved")
}

pub async fn update_placement(
    service: &AcademicsService,
    request: &HttpRequest,
    student_id: i64,
    placement: UpdatePlacementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    validate_placement(placement.grade_level, placement.stream)
        .map_err(|msg| bad_request(ErrorCode::InvalidPlacement, msg))?;

    let profile = storage
        .update_student_placement(student_id, placement)
        .await
        .map_err(internal("Failed to update placement"))?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student not found"))?;

    info!(
        "Admin {} moved student {} to grade {}{}",
        admin.id, student_id, profile.grade_level, profile.section
    );
    ok(profile, "Placement updated")
}
