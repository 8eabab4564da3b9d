use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, MAX_TITLE_CHARS, validate_max_score};
use crate::models::{ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::services::{access, bad_request, created, current_user, internal, invalid};
use crate::utils::validate::validate_text_len;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut assignment: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    validate_text_len(&assignment.title, "Title", 1, MAX_TITLE_CHARS)
        .map_err(invalid(ErrorCode::AssignmentInvalid))?;
    validate_max_score(assignment.max_score).map_err(invalid(ErrorCode::AssignmentInvalid))?;
    if !assignment.subject.is_taught_in(assignment.grade_level) {
        return Err(bad_request(
            ErrorCode::AssignmentInvalid,
            format!(
                "{} is not taught in grade {}",
                assignment.subject, assignment.grade_level
            ),
        ));
    }
    access::ensure_teaches(
        &storage,
        &user,
        assignment.grade_level,
        assignment.section.as_ref(),
        assignment.subject,
    )
    .await?;
    access::ensure_file_exists(&storage, assignment.attachment_token.as_deref()).await?;

    assignment.title = assignment.title.trim().to_string();
    let assignment = storage
        .create_assignment(user.id, assignment)
        .await
        .map_err(internal("Failed to create assignment"))?;

    info!(
        "Teacher {} created assignment {} for grade {}",
        user.id, assignment.id, assignment.grade_level
    );
    created(assignment, "Assignment created")
}
