use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use super::MAX_CONTENT_CHARS;
use crate::models::{ErrorCode, assignments::requests::SubmitAssignmentRequest};
use crate::services::{
    access, assignments::load_assignment, bad_request, conflict, created, current_user, internal,
    not_found, storage_error,
};

pub async fn submit_assignment(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    mut submission: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    let profile = access::student_profile(&storage, student.id).await?;
    if !profile.is_in(assignment.grade_level, assignment.section.as_ref()) {
        return Err(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    }

    submission.content = submission
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    submission.file_token = submission.file_token.filter(|t| !t.trim().is_empty());
    if submission.content.is_none() && submission.file_token.is_none() {
        return Err(bad_request(
            ErrorCode::SubmissionInvalid,
            "A submission needs text content or an uploaded file",
        ));
    }
    if submission
        .content
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_CONTENT_CHARS)
    {
        return Err(bad_request(
            ErrorCode::SubmissionInvalid,
            format!("Submission text is limited to {MAX_CONTENT_CHARS} characters"),
        ));
    }
    access::ensure_file_exists(&storage, submission.file_token.as_deref()).await?;

    let existing = storage
        .get_student_submission(assignment_id, student.id)
        .await
        .map_err(internal("Failed to check existing submission"))?;
    if existing.is_some() {
        return Err(conflict(
            ErrorCode::SubmissionAlreadyExists,
            "You have already submitted this assignment",
        ));
    }

    let is_late = assignment.is_past_due(chrono::Utc::now());
    if is_late && !assignment.allow_late {
        return Err(bad_request(
            ErrorCode::SubmissionDeadlinePassed,
            "The deadline for this assignment has passed",
        ));
    }

    // the unique index settles two concurrent submits
    let submission = storage
        .create_submission(assignment_id, student.id, submission, is_late)
        .await
        .map_err(storage_error(
            "Submission for this assignment",
            ErrorCode::SubmissionAlreadyExists,
        ))?;

    info!(
        "Student {} submitted assignment {}{}",
        student.id,
        assignment_id,
        if is_late { " (late)" } else { "" }
    );
    created(submission, "Assignment submitted")
}
