use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::{QuizService, load_attempt, load_questions, load_quiz};
use crate::errors::DlmsError;
use crate::models::{
    ErrorCode,
    quizzes::{
        entities::{AttemptStatus, Quiz, QuizAttempt},
        requests::SaveAnswerRequest,
        responses::{AttemptListResponse, AttemptResultResponse, AttemptSession, QuestionView},
        scoring,
    },
    users::entities::{User, UserRole},
};
use crate::services::{
    access, bad_request, conflict, created, current_user, forbidden, internal, not_found, ok,
    reject,
};
use crate::storage::Storage;

pub const MAX_ANSWER_CHARS: usize = 2000;

fn already_submitted() -> actix_web::Error {
    conflict(
        ErrorCode::AttemptAlreadySubmitted,
        "This attempt has already been submitted",
    )
}

/// The attempt must belong to the calling student
fn ensure_own_attempt(user: &User, attempt: &QuizAttempt) -> ActixResult<()> {
    if attempt.student_id != user.id {
        return Err(not_found(ErrorCode::AttemptNotFound, "Attempt not found"));
    }
    Ok(())
}

/// Published, aimed at the student's class and inside its window
async fn ensure_available(
    storage: &Arc<dyn Storage>,
    user: &User,
    quiz: &Quiz,
) -> ActixResult<()> {
    let profile = access::student_profile(storage, user.id).await?;
    if !quiz.is_published || !profile.is_in(quiz.grade_level, quiz.section.as_ref()) {
        return Err(not_found(ErrorCode::QuizNotFound, "Quiz not found"));
    }
    if !quiz.is_open(Utc::now()) {
        return Err(bad_request(
            ErrorCode::QuizNotAvailable,
            "Quiz is not open for attempts right now",
        ));
    }
    Ok(())
}

async fn session(
    storage: &Arc<dyn Storage>,
    quiz: &Quiz,
    attempt: QuizAttempt,
) -> ActixResult<AttemptSession> {
    let questions = load_questions(storage, quiz.id)
        .await?
        .into_iter()
        .map(|q| QuestionView::from_question(q, false))
        .collect();
    let answers = storage
        .list_answers(attempt.id)
        .await
        .map_err(internal("Failed to load answers"))?;
    Ok(AttemptSession {
        answer_deadline: quiz.answer_deadline(attempt.started_at),
        attempt,
        questions,
        answers,
    })
}

/// Starting twice resumes the open attempt; one attempt per student and quiz
pub async fn start_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    ensure_available(&storage, &user, &quiz).await?;

    let existing = storage
        .get_student_attempt(quiz.id, user.id)
        .await
        .map_err(internal("Failed to load attempt"))?;
    if let Some(attempt) = existing {
        if attempt.status == AttemptStatus::Submitted {
            return Err(already_submitted());
        }
        return ok(session(&storage, &quiz, attempt).await?, "Attempt resumed");
    }

    let questions = load_questions(&storage, quiz.id).await?;
    let max_score = scoring::total_points(&questions);
    let attempt = match storage.start_attempt(quiz.id, user.id, max_score).await {
        Ok(attempt) => attempt,
        // a concurrent start won the race
        Err(DlmsError::Conflict(_)) => storage
            .get_student_attempt(quiz.id, user.id)
            .await
            .map_err(internal("Failed to load attempt"))?
            .ok_or_else(|| not_found(ErrorCode::AttemptNotFound, "Attempt not found"))?,
        Err(e) => return Err(internal("Failed to start attempt")(e)),
    };
    if attempt.status == AttemptStatus::Submitted {
        return Err(already_submitted());
    }

    info!("Student {} started quiz {} (attempt {})", user.id, quiz.id, attempt.id);
    created(session(&storage, &quiz, attempt).await?, "Attempt started")
}

pub async fn save_answer(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
    answer: SaveAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let attempt = load_attempt(&storage, attempt_id).await?;
    ensure_own_attempt(&user, &attempt)?;
    if attempt.status != AttemptStatus::InProgress {
        return Err(already_submitted());
    }

    let quiz = load_quiz(&storage, attempt.quiz_id).await?;
    if let Some(deadline) = quiz.answer_deadline(attempt.started_at)
        && Utc::now() > deadline
    {
        return Err(bad_request(
            ErrorCode::AttemptTimeExpired,
            "Time is up for this attempt, submit it to see your result",
        ));
    }

    let question = storage
        .get_question(answer.question_id)
        .await
        .map_err(internal("Failed to load question"))?
        .filter(|q| q.quiz_id == quiz.id)
        .ok_or_else(|| not_found(ErrorCode::QuestionNotFound, "Question not found"))?;

    if answer.answer.chars().count() > MAX_ANSWER_CHARS {
        return Err(bad_request(
            ErrorCode::BadRequest,
            format!("Answer must be at most {MAX_ANSWER_CHARS} characters"),
        ));
    }

    let saved = match storage.save_answer(attempt.id, question.id, &answer.answer).await {
        Ok(saved) => saved,
        // submitted in the meantime
        Err(DlmsError::Conflict(_)) => return Err(already_submitted()),
        Err(e) => return Err(internal("Failed to save answer")(e)),
    };

    ok(saved, "Answer saved")
}

/// Scores and closes the attempt; late submissions are still accepted
pub async fn submit_attempt(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let attempt = load_attempt(&storage, attempt_id).await?;
    ensure_own_attempt(&user, &attempt)?;

    let attempt = match storage.submit_attempt(attempt.id).await {
        Ok(attempt) => attempt,
        Err(DlmsError::Conflict(_)) => return Err(already_submitted()),
        Err(DlmsError::NotFound(_)) => {
            return Err(not_found(ErrorCode::AttemptNotFound, "Attempt not found"));
        }
        Err(e) => return Err(internal("Failed to submit attempt")(e)),
    };

    info!(
        "Student {} submitted attempt {} scoring {:?}/{}",
        user.id, attempt.id, attempt.score, attempt.max_score
    );
    ok(result_of(&storage, attempt).await?, "Attempt submitted")
}

async fn result_of(
    storage: &Arc<dyn Storage>,
    attempt: QuizAttempt,
) -> ActixResult<AttemptResultResponse> {
    let quiz = load_quiz(storage, attempt.quiz_id).await?;
    let questions = load_questions(storage, quiz.id).await?;
    let answers = storage
        .list_answers(attempt.id)
        .await
        .map_err(internal("Failed to load answers"))?;
    Ok(AttemptResultResponse::build(attempt, quiz, questions, answers))
}

/// Visible to the student, their approved parents, the quiz owner and admins
pub async fn attempt_result(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let attempt = load_attempt(&storage, attempt_id).await?;
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Student => user.id == attempt.student_id,
        UserRole::Teacher => load_quiz(&storage, attempt.quiz_id).await?.teacher_id == user.id,
        UserRole::Parent => storage
            .is_parent_of(user.id, attempt.student_id)
            .await
            .map_err(internal("Failed to check parent link"))?,
    };
    if !allowed {
        return Err(not_found(ErrorCode::AttemptNotFound, "Attempt not found"));
    }
    if attempt.status != AttemptStatus::Submitted {
        return Err(reject(
            actix_web::http::StatusCode::CONFLICT,
            ErrorCode::QuizNotAvailable,
            "Results are available once the attempt is submitted",
        ));
    }

    ok(result_of(&storage, attempt).await?, "Attempt result retrieved")
}

pub async fn list_attempts(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    if !user.is_admin() && quiz.teacher_id != user.id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You can only view attempts on your own quizzes",
        ));
    }

    let items = storage
        .list_attempts(quiz.id)
        .await
        .map_err(internal("Failed to list attempts"))?;

    ok(AttemptListResponse { items }, "Attempts retrieved")
}

pub async fn list_student_attempts(
    service: &QuizService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    access::ensure_can_view_student(&storage, &user, student_id).await?;

    let attempts = storage
        .list_student_attempts(student_id)
        .await
        .map_err(internal("Failed to list attempts"))?;

    ok(attempts, "Attempts retrieved")
}
