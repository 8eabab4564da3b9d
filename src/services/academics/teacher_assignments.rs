use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::{
    ErrorCode,
    academics::{
        requests::{CreateTeacherAssignmentRequest, TeacherAssignmentListParams},
        responses::TeacherAssignmentListResponse,
    },
    users::entities::UserRole,
};
use crate::services::{
    bad_request, created, current_user, internal, not_found, ok, ok_empty, storage_error,
};

pub async fn create_teacher_assignment(
    service: &AcademicsService,
    request: &HttpRequest,
    assignment: CreateTeacherAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let teacher = storage
        .get_user_by_id(assignment.teacher_id)
        .await
        .map_err(internal("Failed to load teacher"))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "Teacher not found"))?;
    if teacher.role != UserRole::Teacher {
        return Err(bad_request(
            ErrorCode::BadRequest,
            format!("User {} is not a teacher", teacher.id),
        ));
    }
    if !assignment.subject.is_taught_in(assignment.grade_level) {
        return Err(bad_request(
            ErrorCode::InvalidPlacement,
            format!(
                "{} is not taught in grade {}",
                assignment.subject, assignment.grade_level
            ),
        ));
    }

    let created_assignment = storage
        .create_teacher_assignment(assignment)
        .await
        .map_err(storage_error(
            "This teaching assignment",
            ErrorCode::TeacherAssignmentExists,
        ))?;

    info!(
        "Admin {} assigned teacher {} to {} in grade {}{}",
        admin.id,
        created_assignment.teacher_id,
        created_assignment.subject,
        created_assignment.grade_level,
        created_assignment.section
    );
    created(created_assignment, "Teaching assignment created")
}

/// Teachers only ever see their own allocations
pub async fn list_teacher_assignments(
    service: &AcademicsService,
    request: &HttpRequest,
    mut params: TeacherAssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if user.role == UserRole::Teacher {
        params.teacher_id = Some(user.id);
    }

    let items = storage
        .list_teacher_assignments(params)
        .await
        .map_err(internal("Failed to list teaching assignments"))?;

    ok(
        TeacherAssignmentListResponse { items },
        "Teaching assignments retrieved",
    )
}

pub async fn delete_teacher_assignment(
    service: &AcademicsService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let deleted = storage
        .delete_teacher_assignment(id)
        .await
        .map_err(internal("Failed to delete teaching assignment"))?;
    if !deleted {
        return Err(not_found(
            ErrorCode::TeacherAssignmentNotFound,
            "Teaching assignment not found",
        ));
    }

    ok_empty("Teaching assignment deleted")
}
