use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::quizzes::requests::{
    CreateQuizRequest, QuestionRequest, QuizListParams, SaveAnswerRequest, UpdateQuizRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::{SafeAttemptIdI64, SafeIDI64, SafeQuestionIdI64, SafeStudentIdI64};

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(
    req: HttpRequest,
    query: web::Query<QuizListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, query.into_inner()).await
}

pub async fn create_quiz(
    req: HttpRequest,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, body.into_inner()).await
}

pub async fn get_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, id.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.update_quiz(&req, id.0, body.into_inner()).await
}

pub async fn delete_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, id.0).await
}

pub async fn publish(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.set_published(&req, id.0, true).await
}

pub async fn unpublish(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.set_published(&req, id.0, false).await
}

pub async fn add_question(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.add_question(&req, id.0, body.into_inner()).await
}

pub async fn update_question(
    req: HttpRequest,
    id: SafeIDI64,
    question_id: SafeQuestionIdI64,
    body: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_question(&req, id.0, question_id.0, body.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    id: SafeIDI64,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_question(&req, id.0, question_id.0).await
}

pub async fn start_attempt(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.start_attempt(&req, id.0).await
}

pub async fn list_attempts(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(&req, id.0).await
}

pub async fn save_answer(
    req: HttpRequest,
    attempt_id: SafeAttemptIdI64,
    body: web::Json<SaveAnswerRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .save_answer(&req, attempt_id.0, body.into_inner())
        .await
}

pub async fn submit_attempt(
    req: HttpRequest,
    attempt_id: SafeAttemptIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.submit_attempt(&req, attempt_id.0).await
}

pub async fn attempt_result(
    req: HttpRequest,
    attempt_id: SafeAttemptIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.attempt_result(&req, attempt_id.0).await
}

pub async fn list_student_attempts(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_student_attempts(&req, student_id.0).await
}

pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    let teachers = || RequireRole::new_any(UserRole::teacher_roles());
    let students = || RequireRole::new_any(UserRole::student_roles());

    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_quizzes))
                    .route(web::post().to(create_quiz).wrap(teachers())),
            )
            .route(
                "/students/{student_id}/attempts",
                web::get().to(list_student_attempts),
            )
            .service(
                web::resource("/attempts/{attempt_id}/answers")
                    .wrap(students())
                    .route(web::put().to(save_answer)),
            )
            .service(
                web::resource("/attempts/{attempt_id}/submit")
                    .wrap(students())
                    .route(web::post().to(submit_attempt)),
            )
            .route(
                "/attempts/{attempt_id}/result",
                web::get().to(attempt_result),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_quiz))
                    .route(web::put().to(update_quiz).wrap(teachers()))
                    .route(web::delete().to(delete_quiz).wrap(teachers())),
            )
            .service(
                web::resource("/{id}/publish")
                    .wrap(teachers())
                    .route(web::post().to(publish)),
            )
            .service(
                web::resource("/{id}/unpublish")
                    .wrap(teachers())
                    .route(web::post().to(unpublish)),
            )
            .service(
                web::resource("/{id}/questions")
                    .wrap(teachers())
                    .route(web::post().to(add_question)),
            )
            .service(
                web::resource("/{id}/questions/{question_id}")
                    .wrap(teachers())
                    .route(web::put().to(update_question))
                    .route(web::delete().to(delete_question)),
            )
            .service(
                web::resource("/{id}/attempts")
                    .route(web::get().to(list_attempts).wrap(teachers()))
                    .route(web::post().to(start_attempt).wrap(students())),
            ),
    );
}
