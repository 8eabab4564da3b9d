use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::models::{ErrorCode, PaginationQuery, users::entities::UserRole};
use crate::services::{
    access, assignments::load_assignment, current_user, forbidden, internal, ok,
};

pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    let (page, size) = query.normalized();
    let submissions = storage
        .list_my_submissions(student.id, page, size)
        .await
        .map_err(internal("Failed to list submissions"))?;

    ok(submissions, "Submissions retrieved")
}

/// A student's submissions as seen by a teacher, admin or approved parent
pub async fn list_student_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    student_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    access::ensure_can_view_student(&storage, &user, student_id).await?;

    let (page, size) = query.normalized();
    let submissions = storage
        .list_my_submissions(student_id, page, size)
        .await
        .map_err(internal("Failed to list submissions"))?;

    ok(submissions, "Submissions retrieved")
}

/// Submitting student, owning teacher, approved parent or admin
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let submission = load_submission(&storage, submission_id).await?;
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Student => submission.student_id == user.id,
        UserRole::Teacher => {
            load_assignment(&storage, submission.assignment_id)
                .await?
                .teacher_id
                == user.id
        }
        UserRole::Parent => storage
            .is_parent_of(user.id, submission.student_id)
            .await
            .map_err(internal("Failed to check parent link"))?,
    };
    if !allowed {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You cannot view this submission",
        ));
    }

    ok(submission, "Submission retrieved")
}
