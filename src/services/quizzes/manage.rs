use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    QuizService, ensure_subject_in_grade, load_questions, load_quiz, validate_quiz_fields,
};
use crate::models::{
    ErrorCode,
    quizzes::{
        requests::{CreateQuizRequest, QuizListParams, QuizListQuery, UpdateQuizRequest},
        responses::{QuestionView, QuizDetailResponse},
        scoring,
    },
    users::entities::UserRole,
};
use crate::services::{
    access, bad_request, conflict, created, current_user, internal, invalid, not_found, ok,
    ok_empty,
};

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    mut quiz: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    validate_quiz_fields(
        &quiz.title,
        quiz.time_limit_minutes,
        quiz.available_from,
        quiz.available_until,
    )
    .map_err(invalid(ErrorCode::QuizInvalid))?;
    ensure_subject_in_grade(quiz.subject, quiz.grade_level)?;
    access::ensure_teaches(
        &storage,
        &user,
        quiz.grade_level,
        quiz.section.as_ref(),
        quiz.subject,
    )
    .await?;

    quiz.title = quiz.title.trim().to_string();
    let quiz = storage
        .create_quiz(user.id, quiz)
        .await
        .map_err(internal("Failed to create quiz"))?;

    info!("Teacher {} created quiz {}", user.id, quiz.id);
    created(quiz, "Quiz created")
}

/// Students see published quizzes for their class that are open right now
pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    query: QuizListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let scope = access::audience_scope(&storage, &user).await?;
    let is_student = user.role == UserRole::Student;
    let (page, size) = query.pagination.normalized();

    let mut quizzes = storage
        .list_quizzes(QuizListQuery {
            page,
            size,
            scope,
            open_at: is_student.then(chrono::Utc::now),
            subject: query.subject,
            grade_level: query.grade_level,
            search: query.search,
        })
        .await
        .map_err(internal("Failed to list quizzes"))?;

    if is_student {
        for item in &mut quizzes.items {
            item.my_attempt = storage
                .get_student_attempt(item.quiz.id, user.id)
                .await
                .map_err(internal("Failed to load attempt"))?;
        }
    }

    ok(quizzes, "Quizzes retrieved")
}

/// The answer key is shown to the owning teacher and admins only
pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    let visible = access::can_view_class_row(
        &storage,
        &user,
        quiz.teacher_id,
        quiz.grade_level,
        quiz.section.as_ref(),
    )
    .await?;
    let is_student = user.role == UserRole::Student;
    if !visible || (is_student && !quiz.is_published) {
        return Err(not_found(ErrorCode::QuizNotFound, "Quiz not found"));
    }

    let questions = load_questions(&storage, quiz.id).await?;
    let total_points = scoring::total_points(&questions);
    let my_attempt = if is_student {
        storage
            .get_student_attempt(quiz.id, user.id)
            .await
            .map_err(internal("Failed to load attempt"))?
    } else {
        None
    };

    let questions = questions
        .into_iter()
        .map(|q| QuestionView::from_question(q, !is_student))
        .collect();

    ok(
        QuizDetailResponse {
            quiz,
            questions,
            total_points,
            my_attempt,
        },
        "Quiz retrieved",
    )
}

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    mut update: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    access::ensure_owner(&user, quiz.teacher_id, ErrorCode::Forbidden, "quizzes")?;

    // validate the quiz as it will look after the update
    let title = update.title.as_deref().unwrap_or(&quiz.title);
    validate_quiz_fields(
        title,
        update.time_limit_minutes.or(quiz.time_limit_minutes),
        update.available_from.or(quiz.available_from),
        update.available_until.or(quiz.available_until),
    )
    .map_err(invalid(ErrorCode::QuizInvalid))?;
    update.title = update.title.map(|t| t.trim().to_string());

    let updated = storage
        .update_quiz(quiz_id, update)
        .await
        .map_err(internal("Failed to update quiz"))?
        .ok_or_else(|| not_found(ErrorCode::QuizNotFound, "Quiz not found"))?;

    ok(updated, "Quiz updated")
}

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    access::ensure_owner(&user, quiz.teacher_id, ErrorCode::Forbidden, "quizzes")?;

    let deleted = storage
        .delete_quiz(quiz_id)
        .await
        .map_err(internal("Failed to delete quiz"))?;
    if !deleted {
        return Err(not_found(ErrorCode::QuizNotFound, "Quiz not found"));
    }

    info!("User {} deleted quiz {}", user.id, quiz_id);
    ok_empty("Quiz deleted")
}

/// Publishing needs at least one question; a quiz with attempts stays published
pub async fn set_published(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    published: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let quiz = load_quiz(&storage, quiz_id).await?;
    access::ensure_owner(&user, quiz.teacher_id, ErrorCode::Forbidden, "quizzes")?;

    if published {
        if quiz.is_published {
            return Err(conflict(
                ErrorCode::QuizAlreadyPublished,
                "Quiz is already published",
            ));
        }
        if load_questions(&storage, quiz_id).await?.is_empty() {
            return Err(bad_request(
                ErrorCode::QuizInvalid,
                "Add at least one question before publishing",
            ));
        }
    } else {
        let attempts = storage
            .list_attempts(quiz_id)
            .await
            .map_err(internal("Failed to load attempts"))?;
        if !attempts.is_empty() {
            return Err(conflict(
                ErrorCode::QuizAlreadyPublished,
                "Students have already attempted this quiz",
            ));
        }
    }

    let quiz = storage
        .set_quiz_published(quiz_id, published)
        .await
        .map_err(internal("Failed to update quiz"))?
        .ok_or_else(|| not_found(ErrorCode::QuizNotFound, "Quiz not found"))?;

    info!(
        "User {} {} quiz {}",
        user.id,
        if published { "published" } else { "unpublished" },
        quiz_id
    );
    ok(
        quiz,
        if published {
            "Quiz published"
        } else {
            "Quiz unpublished"
        },
    )
}
