use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{AssignmentService, load_assignment};
use crate::models::{
    ErrorCode,
    assignments::{
        entities::StudentAssignmentStatus,
        requests::{AssignmentListParams, AssignmentListQuery, SubmissionListParams},
        responses::{AssignmentListItem, AssignmentListResponse},
    },
    users::entities::UserRole,
};
use crate::services::{access, current_user, internal, ok};

/// Students get their own status on each assignment
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let scope = access::audience_scope(&storage, &user).await?;
    let (page, size) = query.pagination.normalized();
    let assignments = storage
        .list_assignments(AssignmentListQuery {
            page,
            size,
            scope,
            subject: query.subject,
            grade_level: query.grade_level,
            search: query.search,
        })
        .await
        .map_err(internal("Failed to list assignments"))?;

    let mut submissions = HashMap::new();
    if user.role == UserRole::Student {
        let ids: Vec<i64> = assignments.items.iter().map(|a| a.id).collect();
        submissions = storage
            .list_student_submissions_for(user.id, &ids)
            .await
            .map_err(internal("Failed to load submissions"))?
            .into_iter()
            .map(|s| (s.assignment_id, s))
            .collect();
    }

    let now = chrono::Utc::now();
    let items = assignments
        .items
        .into_iter()
        .map(|assignment| {
            let my_submission = submissions.remove(&assignment.id);
            let my_status = (user.role == UserRole::Student).then(|| {
                StudentAssignmentStatus::resolve(&assignment, my_submission.as_ref(), now)
            });
            AssignmentListItem {
                assignment,
                my_status,
                my_submission,
            }
        })
        .collect();

    ok(
        AssignmentListResponse {
            items,
            pagination: assignments.pagination,
        },
        "Assignments retrieved",
    )
}

/// Owning teacher or admin
pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    access::ensure_owner(&user, assignment.teacher_id, ErrorCode::Forbidden, "assignments")?;

    let (page, size) = query.pagination.normalized();
    let submissions = storage
        .list_submissions_for_assignment(assignment_id, page, size, query.status)
        .await
        .map_err(internal("Failed to list submissions"))?;

    ok(submissions, "Submissions retrieved")
}
