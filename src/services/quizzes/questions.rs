use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{QuizService, ensure_unpublished, load_quiz};
use crate::models::{
    ErrorCode,
    quizzes::{
        entities::{Quiz, QuizQuestion},
        requests::QuestionRequest,
    },
    users::entities::User,
};
use crate::services::{access, created, current_user, internal, invalid, not_found, ok, ok_empty};
use crate::storage::Storage;

/// Quiz the caller may edit questions of
async fn editable_quiz(
    storage: &Arc<dyn Storage>,
    user: &User,
    quiz_id: i64,
) -> ActixResult<Quiz> {
    let quiz = load_quiz(storage, quiz_id).await?;
    access::ensure_owner(user, quiz.teacher_id, ErrorCode::Forbidden, "quizzes")?;
    ensure_unpublished(&quiz)?;
    Ok(quiz)
}

async fn question_of(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
    question_id: i64,
) -> ActixResult<QuizQuestion> {
    storage
        .get_question(question_id)
        .await
        .map_err(internal("Failed to load question"))?
        .filter(|q| q.quiz_id == quiz_id)
        .ok_or_else(|| not_found(ErrorCode::QuestionNotFound, "Question not found"))
}

pub async fn add_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    question: QuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    editable_quiz(&storage, &user, quiz_id).await?;
    let question = question.validate().map_err(invalid(ErrorCode::QuizInvalid))?;

    let question = storage
        .add_question(quiz_id, question)
        .await
        .map_err(internal("Failed to add question"))?;

    created(question, "Question added")
}

pub async fn update_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    question_id: i64,
    question: QuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    editable_quiz(&storage, &user, quiz_id).await?;
    question_of(&storage, quiz_id, question_id).await?;
    let question = question.validate().map_err(invalid(ErrorCode::QuizInvalid))?;

    let question = storage
        .update_question(question_id, question)
        .await
        .map_err(internal("Failed to update question"))?
        .ok_or_else(|| not_found(ErrorCode::QuestionNotFound, "Question not found"))?;

    ok(question, "Question updated")
}

pub async fn delete_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    editable_quiz(&storage, &user, quiz_id).await?;
    question_of(&storage, quiz_id, question_id).await?;

    let deleted = storage
        .delete_question(question_id)
        .await
        .map_err(internal("Failed to delete question"))?;
    if !deleted {
        return Err(not_found(ErrorCode::QuestionNotFound, "Question not found"));
    }

    ok_empty("Question deleted")
}
