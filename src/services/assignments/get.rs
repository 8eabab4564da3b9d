use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::{
    ErrorCode,
    assignments::{entities::StudentAssignmentStatus, responses::AssignmentListItem},
    users::entities::UserRole,
};
use crate::services::{access, current_user, internal, not_found, ok};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    let visible = access::can_view_class_row(
        &storage,
        &user,
        assignment.teacher_id,
        assignment.grade_level,
        assignment.section.as_ref(),
    )
    .await?;
    // hidden rows answer like missing ones
    if !visible {
        return Err(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    }

    let (my_status, my_submission) = if user.role == UserRole::Student {
        let submission = storage
            .get_student_submission(assignment.id, user.id)
            .await
            .map_err(internal("Failed to load submission"))?;
        let status =
            StudentAssignmentStatus::resolve(&assignment, submission.as_ref(), chrono::Utc::now());
        (Some(status), submission)
    } else {
        (None, None)
    };

    ok(
        AssignmentListItem {
            assignment,
            my_status,
            my_submission,
        },
        "Assignment retrieved",
    )
}
