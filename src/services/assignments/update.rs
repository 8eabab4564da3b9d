use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, MAX_TITLE_CHARS, load_assignment, validate_max_score};
use crate::models::{ErrorCode, assignments::requests::UpdateAssignmentRequest};
use crate::services::{access, current_user, internal, invalid, not_found, ok};
use crate::utils::validate::validate_text_len;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut update: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    access::ensure_owner(&user, assignment.teacher_id, ErrorCode::Forbidden, "assignments")?;

    if let Some(ref title) = update.title {
        validate_text_len(title, "Title", 1, MAX_TITLE_CHARS)
            .map_err(invalid(ErrorCode::AssignmentInvalid))?;
        update.title = Some(title.trim().to_string());
    }
    if let Some(max_score) = update.max_score {
        validate_max_score(max_score).map_err(invalid(ErrorCode::AssignmentInvalid))?;
    }
    access::ensure_file_exists(&storage, update.attachment_token.as_deref()).await?;

    let updated = storage
        .update_assignment(assignment_id, update)
        .await
        .map_err(internal("Failed to update assignment"))?
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    ok(updated, "Assignment updated")
}
