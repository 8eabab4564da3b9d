use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, load_assignment};
use crate::models::ErrorCode;
use crate::services::{access, current_user, internal, not_found, ok_empty};

/// Submissions go with the assignment
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    access::ensure_owner(&user, assignment.teacher_id, ErrorCode::Forbidden, "assignments")?;

    let deleted = storage
        .delete_assignment(assignment_id)
        .await
        .map_err(internal("Failed to delete assignment"))?;
    if !deleted {
        return Err(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    }

    info!("User {} deleted assignment {}", user.id, assignment_id);
    ok_empty("Assignment deleted")
}
