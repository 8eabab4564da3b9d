use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubmissionService, load_submission, validate_score};
use crate::models::{ErrorCode, assignments::requests::GradeSubmissionRequest};
use crate::services::{
    access, assignments::load_assignment, current_user, internal, invalid, not_found, ok,
};

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let submission = load_submission(&storage, submission_id).await?;
    let assignment = load_assignment(&storage, submission.assignment_id).await?;
    access::ensure_owner(&user, assignment.teacher_id, ErrorCode::Forbidden, "assignments")?;

    validate_score(grade.score, assignment.max_score).map_err(invalid(ErrorCode::ScoreOutOfRange))?;
    let feedback = grade
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    let graded = storage
        .grade_submission(submission_id, user.id, grade.score, feedback)
        .await
        .map_err(internal("Failed to grade submission"))?
        .ok_or_else(|| not_found(ErrorCode::SubmissionNotFound, "Submission not found"))?;

    info!(
        "User {} graded submission {} with {}/{}",
        user.id, submission_id, grade.score, assignment.max_score
    );
    ok(graded, "Submission graded")
}
