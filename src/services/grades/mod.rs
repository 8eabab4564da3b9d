//! Recorded term marks and report cards

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ErrorCode,
    grades::{
        entities::TERMS,
        requests::{GradeListParams, RecordGradeRequest, ReportCardParams},
        responses::{GradeListResponse, ReportCard},
    },
};
use crate::services::{
    access, bad_request, current_user, internal, invalid, not_found, ok, ok_empty,
    submissions::validate_score,
};

const MIN_ACADEMIC_YEAR: i32 = 2000;
const MAX_ACADEMIC_YEAR: i32 = 2100;

fn validate_term(term: i32, academic_year: i32) -> Result<(), String> {
    if !TERMS.contains(&term) {
        return Err(format!("Term must be one of {TERMS:?}"));
    }
    if !(MIN_ACADEMIC_YEAR..=MAX_ACADEMIC_YEAR).contains(&academic_year) {
        return Err(format!(
            "Academic year must be between {MIN_ACADEMIC_YEAR} and {MAX_ACADEMIC_YEAR}"
        ));
    }
    Ok(())
}

define_service!(GradeService);

impl GradeService {
    /// Creates or replaces the mark for (student, subject, term, year)
    pub async fn record_grade(
        &self,
        request: &HttpRequest,
        mut grade: RecordGradeRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        validate_term(grade.term, grade.academic_year).map_err(invalid(ErrorCode::BadRequest))?;
        if !(grade.max_score.is_finite() && grade.max_score > 0.0) {
            return Err(bad_request(
                ErrorCode::ScoreOutOfRange,
                "Max score must be greater than zero",
            ));
        }
        validate_score(grade.score, grade.max_score).map_err(invalid(ErrorCode::ScoreOutOfRange))?;

        let student = access::student_profile(&storage, grade.student_id).await?;
        if !grade.subject.is_taken_by(student.grade_level, student.stream) {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!(
                    "{} is not part of this student's curriculum",
                    grade.subject
                ),
            ));
        }
        access::ensure_teaches(
            &storage,
            &user,
            student.grade_level,
            Some(&student.section),
            grade.subject,
        )
        .await?;

        grade.remarks = grade
            .remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let record = storage
            .upsert_grade(user.id, grade)
            .await
            .map_err(internal("Failed to record grade"))?;

        info!(
            "User {} recorded {} for student {} (term {}, {})",
            user.id, record.subject, record.student_id, record.term, record.academic_year
        );
        ok(record, "Grade recorded")
    }

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        params: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        access::ensure_can_view_student(&storage, &user, student_id).await?;
        access::student_profile(&storage, student_id).await?;

        let items = storage
            .list_grades(student_id, params)
            .await
            .map_err(internal("Failed to list grades"))?;

        ok(GradeListResponse { items }, "Grades retrieved")
    }

    pub async fn report_card(
        &self,
        request: &HttpRequest,
        student_id: i64,
        params: ReportCardParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        validate_term(params.term, params.academic_year)
            .map_err(invalid(ErrorCode::BadRequest))?;
        access::ensure_can_view_student(&storage, &user, student_id).await?;
        let student = access::student_summary(&storage, student_id).await?;

        let records = storage
            .list_grades(
                student_id,
                GradeListParams {
                    term: Some(params.term),
                    academic_year: Some(params.academic_year),
                    subject: None,
                },
            )
            .await
            .map_err(internal("Failed to list grades"))?;

        ok(
            ReportCard::build(student, params.term, params.academic_year, records),
            "Report card",
        )
    }

    /// Recording teacher or admin
    pub async fn delete_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let record = storage
            .get_grade(grade_id)
            .await
            .map_err(internal("Failed to load grade"))?
            .ok_or_else(|| not_found(ErrorCode::GradeNotFound, "Grade not found"))?;
        access::ensure_owner(&user, record.teacher_id, ErrorCode::Forbidden, "grades")?;

        let deleted = storage
            .delete_grade(grade_id)
            .await
            .map_err(internal("Failed to delete grade"))?;
        if !deleted {
            return Err(not_found(ErrorCode::GradeNotFound, "Grade not found"));
        }

        ok_empty("Grade deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_validation() {
        assert!(validate_term(1, 2026).is_ok());
        assert!(validate_term(2, 2026).is_ok());
        assert!(validate_term(3, 2026).is_err());
        assert!(validate_term(1, 1990).is_err());
    }
}
