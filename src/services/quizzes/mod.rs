//! Quizzes, their questions and student attempts
//!
//! An attempt moves `in_progress -> submitted` exactly once. Answers are
//! saved while the attempt is open and before its deadline; submission scores
//! them in a single transaction.

pub mod attempts;
pub mod manage;
pub mod questions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    academics::taxonomy::{GradeLevel, Subject},
    quizzes::{
        entities::{Quiz, QuizAttempt, QuizQuestion},
        requests::{
            CreateQuizRequest, QuestionRequest, QuizListParams, SaveAnswerRequest,
            UpdateQuizRequest,
        },
    },
};
use crate::services::{bad_request, conflict, internal, not_found};
use crate::storage::Storage;
use crate::utils::validate::validate_text_len;

pub const MAX_TITLE_CHARS: usize = 200;
/// Upper bound on a quiz time limit, in minutes
pub const MAX_TIME_LIMIT_MINUTES: i32 = 600;

define_service!(QuizService);

impl QuizService {
    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        quiz: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_quiz(self, request, quiz).await
    }

    pub async fn list_quizzes(
        &self,
        request: &HttpRequest,
        query: QuizListParams,
    ) -> ActixResult<HttpResponse> {
        manage::list_quizzes(self, request, query).await
    }

    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        manage::get_quiz(self, request, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_quiz(self, request, quiz_id, update).await
    }

    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_quiz(self, request, quiz_id).await
    }

    pub async fn set_published(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        published: bool,
    ) -> ActixResult<HttpResponse> {
        manage::set_published(self, request, quiz_id, published).await
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        question: QuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, request, quiz_id, question).await
    }

    pub async fn update_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        question_id: i64,
        question: QuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::update_question(self, request, quiz_id, question_id, question).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, request, quiz_id, question_id).await
    }

    pub async fn start_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::start_attempt(self, request, quiz_id).await
    }

    pub async fn save_answer(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
        answer: SaveAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::save_answer(self, request, attempt_id, answer).await
    }

    pub async fn submit_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::submit_attempt(self, request, attempt_id).await
    }

    pub async fn attempt_result(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::attempt_result(self, request, attempt_id).await
    }

    pub async fn list_attempts(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, request, quiz_id).await
    }

    pub async fn list_student_attempts(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::list_student_attempts(self, request, student_id).await
    }
}

pub(crate) async fn load_quiz(storage: &Arc<dyn Storage>, quiz_id: i64) -> ActixResult<Quiz> {
    storage
        .get_quiz(quiz_id)
        .await
        .map_err(internal("Failed to load quiz"))?
        .ok_or_else(|| not_found(ErrorCode::QuizNotFound, "Quiz not found"))
}

pub(crate) async fn load_questions(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
) -> ActixResult<Vec<QuizQuestion>> {
    storage
        .list_questions(quiz_id)
        .await
        .map_err(internal("Failed to load questions"))
}

pub(crate) async fn load_attempt(
    storage: &Arc<dyn Storage>,
    attempt_id: i64,
) -> ActixResult<QuizAttempt> {
    storage
        .get_attempt(attempt_id)
        .await
        .map_err(internal("Failed to load attempt"))?
        .ok_or_else(|| not_found(ErrorCode::AttemptNotFound, "Attempt not found"))
}

/// Questions may only change before students can see the quiz
pub(crate) fn ensure_unpublished(quiz: &Quiz) -> ActixResult<()> {
    if quiz.is_published {
        return Err(conflict(
            ErrorCode::QuizAlreadyPublished,
            "Unpublish the quiz before changing its questions",
        ));
    }
    Ok(())
}

/// Title, time limit and availability window of a quiz
pub(crate) fn validate_quiz_fields(
    title: &str,
    time_limit_minutes: Option<i32>,
    available_from: Option<DateTime<Utc>>,
    available_until: Option<DateTime<Utc>>,
) -> Result<(), String> {
    validate_text_len(title, "Title", 1, MAX_TITLE_CHARS)?;
    if let Some(minutes) = time_limit_minutes
        && !(1..=MAX_TIME_LIMIT_MINUTES).contains(&minutes)
    {
        return Err(format!(
            "Time limit must be between 1 and {MAX_TIME_LIMIT_MINUTES} minutes"
        ));
    }
    if let (Some(from), Some(until)) = (available_from, available_until)
        && from >= until
    {
        return Err("Availability must start before it ends".to_string());
    }
    Ok(())
}

pub(crate) fn ensure_subject_in_grade(subject: Subject, grade_level: GradeLevel) -> ActixResult<()> {
    if subject.is_taught_in(grade_level) {
        Ok(())
    } else {
        Err(bad_request(
            ErrorCode::QuizInvalid,
            format!("{subject} is not taught in grade {grade_level}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_quiz_field_validation() {
        let now = Utc::now();
        assert!(validate_quiz_fields("Cells", Some(30), None, None).is_ok());
        assert!(validate_quiz_fields("", None, None, None).is_err());
        assert!(validate_quiz_fields("Cells", Some(0), None, None).is_err());
        assert!(validate_quiz_fields("Cells", Some(601), None, None).is_err());
        assert!(
            validate_quiz_fields("Cells", None, Some(now), Some(now - Duration::hours(1)))
                .is_err()
        );
        assert!(
            validate_quiz_fields("Cells", None, Some(now), Some(now + Duration::hours(1)))
                .is_ok()
        );
    }
}
