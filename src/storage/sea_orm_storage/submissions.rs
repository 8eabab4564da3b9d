//! Submissions

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::submissions::{ActiveModel, Column};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Submission, SubmissionStatus},
        requests::SubmitAssignmentRequest,
        responses::{
            MySubmissionItem, MySubmissionListResponse, SubmissionListItem, SubmissionListResponse,
        },
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// Inserts the only submission a student may make; a second one is a Conflict
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: SubmitAssignmentRequest,
        is_late: bool,
    ) -> Result<Submission> {
        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(req.content.filter(|c| !c.trim().is_empty())),
            file_token: Set(req.file_token.filter(|t| !t.trim().is_empty())),
            status: Set(SubmissionStatus::Submitted.to_string()),
            score: Set(None),
            feedback: Set(None),
            is_late: Set(is_late),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            graded_at: Set(None),
            graded_by: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create submission"))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load submission"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_student_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load submission"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// A student's submissions among the given assignments
    pub async fn list_student_submissions_for_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list submissions"))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
        page: u64,
        size: u64,
        status: Option<SubmissionStatus>,
    ) -> Result<SubmissionListResponse> {
        let mut select = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .find_also_related(Users);

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count submissions"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Failed to list submissions"))?;

        let items = rows
            .into_iter()
            .map(|(submission, student)| SubmissionListItem {
                student_name: student.map(|u| u.full_name).unwrap_or_default(),
                submission: submission.into_submission(),
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_my_submissions_impl(
        &self,
        student_id: i64,
        page: u64,
        size: u64,
    ) -> Result<MySubmissionListResponse> {
        let paginator = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Assignments)
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count submissions"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Failed to list submissions"))?;

        let items = rows
            .into_iter()
            .filter_map(|(submission, assignment)| {
                assignment.map(|a| MySubmissionItem {
                    submission: submission.into_submission(),
                    assignment: a.into_assignment(),
                })
            })
            .collect();

        Ok(MySubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// Records a score; regrading overwrites the previous one
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let result = Submissions::update_many()
            .col_expr(Column::Score, Expr::value(score))
            .col_expr(Column::Feedback, Expr::value(feedback))
            .col_expr(Column::Status, Expr::value(SubmissionStatus::Graded.to_string()))
            .col_expr(Column::GradedAt, Expr::value(chrono::Utc::now().timestamp()))
            .col_expr(Column::GradedBy, Expr::value(grader_id))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to grade submission"))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_submission_impl(id).await
    }
}
