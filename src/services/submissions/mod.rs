//! Homework submissions: one per student per assignment

pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode, PaginationQuery,
    assignments::{
        entities::Submission,
        requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
    },
};
use crate::services::{internal, not_found};
use crate::storage::Storage;

pub const MAX_CONTENT_CHARS: usize = 20_000;

define_service!(SubmissionService);

impl SubmissionService {
    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, submission).await
    }

    pub async fn grade(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade).await
    }

    pub async fn list_mine(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request, query).await
    }

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_student_submissions(self, request, student_id, query).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_submission(self, request, submission_id).await
    }
}

pub(crate) async fn load_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> ActixResult<Submission> {
    storage
        .get_submission(submission_id)
        .await
        .map_err(internal("Failed to load submission"))?
        .ok_or_else(|| not_found(ErrorCode::SubmissionNotFound, "Submission not found"))
}

/// Score must lie within `0..=max_score`
pub(crate) fn validate_score(score: f64, max_score: f64) -> Result<(), String> {
    if score.is_finite() && (0.0..=max_score).contains(&score) {
        Ok(())
    } else {
        Err(format!("Score must be between 0 and {max_score}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(validate_score(0.0, 20.0).is_ok());
        assert!(validate_score(20.0, 20.0).is_ok());
        assert!(validate_score(20.5, 20.0).is_err());
        assert!(validate_score(-1.0, 20.0).is_err());
        assert!(validate_score(f64::INFINITY, 20.0).is_err());
    }
}
