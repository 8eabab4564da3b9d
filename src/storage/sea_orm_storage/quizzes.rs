//! Quizzes, questions, attempts and answers

use std::collections::HashMap;

use super::assignments::scoped;
use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{quiz_answers, quiz_attempts, quiz_questions, quizzes};
use crate::errors::{DlmsError, Result};
use crate::models::{
    PaginationInfo,
    quizzes::{
        entities::{AttemptStatus, Quiz, QuizAnswer, QuizAttempt, QuizQuestion},
        requests::{CreateQuizRequest, NewQuestion, QuizListQuery, UpdateQuizRequest},
        responses::{AttemptListItem, QuizListItem, QuizListResponse},
        scoring,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_quiz_impl(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = QuizActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            subject: Set(req.subject.to_string()),
            grade_level: Set(req.grade_level.value()),
            section: Set(req.section.map(String::from)),
            time_limit_minutes: Set(req.time_limit_minutes),
            available_from: Set(req.available_from.map(|d| d.timestamp())),
            available_until: Set(req.available_until.map(|d| d.timestamp())),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create quiz"))?;

        Ok(result.into_quiz())
    }

    pub async fn get_quiz_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load quiz"))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    pub async fn update_quiz_impl(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        let Some(existing) = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load quiz"))?
        else {
            return Ok(None);
        };

        let mut model: QuizActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(minutes) = update.time_limit_minutes {
            model.time_limit_minutes = Set(Some(minutes).filter(|m| *m > 0));
        }
        if let Some(from) = update.available_from {
            model.available_from = Set(Some(from.timestamp()));
        }
        if let Some(until) = update.available_until {
            model.available_until = Set(Some(until.timestamp()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update quiz"))?;

        Ok(Some(updated.into_quiz()))
    }

    pub async fn set_quiz_published_impl(&self, id: i64, published: bool) -> Result<Option<Quiz>> {
        let result = Quizzes::update_many()
            .col_expr(quizzes::Column::IsPublished, Expr::value(published))
            .col_expr(
                quizzes::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(quizzes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to publish quiz"))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_quiz_impl(id).await
    }

    pub async fn delete_quiz_impl(&self, id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete quiz"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_quizzes_impl(&self, query: QuizListQuery) -> Result<QuizListResponse> {
        let mut select = scoped(
            Quizzes::find(),
            &query.scope,
            quizzes::Column::TeacherId,
            quizzes::Column::GradeLevel,
            quizzes::Column::Section,
        );

        if let Some(now) = query.open_at {
            let now = now.timestamp();
            select = select
                .filter(quizzes::Column::IsPublished.eq(true))
                .filter(
                    Condition::any()
                        .add(quizzes::Column::AvailableFrom.is_null())
                        .add(quizzes::Column::AvailableFrom.lte(now)),
                )
                .filter(
                    Condition::any()
                        .add(quizzes::Column::AvailableUntil.is_null())
                        .add(quizzes::Column::AvailableUntil.gte(now)),
                );
        }
        if let Some(subject) = query.subject {
            select = select.filter(quizzes::Column::Subject.eq(subject.to_string()));
        }
        if let Some(grade_level) = query.grade_level {
            select = select.filter(quizzes::Column::GradeLevel.eq(grade_level.value()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(quizzes::Column::Title.contains(&escaped))
                    .add(quizzes::Column::Description.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_desc(quizzes::Column::CreatedAt)
            .order_by_desc(quizzes::Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count quizzes"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list quizzes"))?;

        let ids: Vec<i64> = rows.iter().map(|q| q.id).collect();
        let counts = self.question_counts(&ids).await?;

        let items = rows
            .into_iter()
            .map(|quiz| QuizListItem {
                question_count: counts.get(&quiz.id).copied().unwrap_or(0),
                quiz: quiz.into_quiz(),
                my_attempt: None,
            })
            .collect();

        Ok(QuizListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    async fn question_counts(&self, quiz_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if quiz_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = QuizQuestions::find()
            .select_only()
            .column(quiz_questions::Column::QuizId)
            .column_as(quiz_questions::Column::Id.count(), "question_count")
            .filter(quiz_questions::Column::QuizId.is_in(quiz_ids.iter().copied()))
            .group_by(quiz_questions::Column::QuizId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to count questions"))?;

        Ok(rows.into_iter().collect())
    }

    pub async fn add_question_impl(&self, quiz_id: i64, question: NewQuestion) -> Result<QuizQuestion> {
        let position = match question.position {
            Some(position) => position,
            None => {
                let last = QuizQuestions::find()
                    .filter(quiz_questions::Column::QuizId.eq(quiz_id))
                    .select_only()
                    .column_as(quiz_questions::Column::Position.max(), "max_position")
                    .into_tuple::<Option<i32>>()
                    .one(&self.db)
                    .await
                    .map_err(db_error("Failed to read question positions"))?
                    .flatten()
                    .unwrap_or(0);
                last + 1
            }
        };

        let model = QuizQuestionActiveModel {
            quiz_id: Set(quiz_id),
            question_text: Set(question.question_text),
            question_type: Set(question.question_type.to_string()),
            options: Set(serde_json::to_string(&question.options)?),
            correct_answer: Set(question.correct_answer),
            points: Set(question.points),
            position: Set(position),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to add question"))?;

        Ok(result.into_question())
    }

    pub async fn get_question_impl(&self, id: i64) -> Result<Option<QuizQuestion>> {
        let result = QuizQuestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load question"))?;

        Ok(result.map(|m| m.into_question()))
    }

    pub async fn update_question_impl(
        &self,
        id: i64,
        question: NewQuestion,
    ) -> Result<Option<QuizQuestion>> {
        let Some(existing) = QuizQuestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load question"))?
        else {
            return Ok(None);
        };

        let mut model: QuizQuestionActiveModel = existing.into();
        model.question_text = Set(question.question_text);
        model.question_type = Set(question.question_type.to_string());
        model.options = Set(serde_json::to_string(&question.options)?);
        model.correct_answer = Set(question.correct_answer);
        model.points = Set(question.points);
        if let Some(position) = question.position {
            model.position = Set(position);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update question"))?;

        Ok(Some(updated.into_question()))
    }

    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = QuizQuestions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete question"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_questions_impl(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>> {
        Ok(load_questions(&self.db, quiz_id)
            .await?
            .into_iter()
            .map(|m| m.into_question())
            .collect())
    }

    /// Opens the student's single attempt; a second insert is a Conflict
    pub async fn start_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        max_score: i32,
    ) -> Result<QuizAttempt> {
        let model = QuizAttemptActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            status: Set(AttemptStatus::InProgress.to_string()),
            score: Set(None),
            max_score: Set(max_score),
            started_at: Set(chrono::Utc::now().timestamp()),
            submitted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to start attempt"))?;

        Ok(result.into_attempt())
    }

    pub async fn get_attempt_impl(&self, id: i64) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attempt"))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    pub async fn get_student_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(quiz_attempts::Column::QuizId.eq(quiz_id))
            .filter(quiz_attempts::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attempt"))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    /// Replaces the answer to a question within an attempt.
    ///
    /// The attempt row is locked and re-read inside the transaction, so an
    /// answer never lands on an attempt that a concurrent submit has closed.
    pub async fn save_answer_impl(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<QuizAnswer> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let attempt = QuizAttempts::find_by_id(attempt_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to load attempt"))?
            .ok_or_else(|| DlmsError::not_found(format!("Attempt {attempt_id} not found")))?;
        if attempt.status != AttemptStatus::IN_PROGRESS {
            return Err(DlmsError::conflict("Attempt already submitted"));
        }

        let saved = match overwrite_answer(&txn, attempt_id, question_id, answer).await? {
            Some(updated) => updated,
            None => {
                let model = QuizAnswerActiveModel {
                    attempt_id: Set(attempt_id),
                    question_id: Set(question_id),
                    answer: Set(answer.to_string()),
                    is_correct: Set(None),
                    points_awarded: Set(None),
                    ..Default::default()
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(db_error("Failed to save answer"))?
                    .into_answer()
            }
        };

        txn.commit()
            .await
            .map_err(db_error("Failed to commit answer"))?;

        Ok(saved)
    }

    pub async fn list_answers_impl(&self, attempt_id: i64) -> Result<Vec<QuizAnswer>> {
        Ok(load_answers(&self.db, attempt_id)
            .await?
            .into_iter()
            .map(|m| m.into_answer())
            .collect())
    }

    /// Scores every answer and closes the attempt inside one transaction.
    ///
    /// The status flip is conditional on `in_progress`, so of two concurrent
    /// submissions exactly one commits and the other gets a Conflict.
    pub async fn submit_attempt_impl(&self, attempt_id: i64) -> Result<QuizAttempt> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let attempt = QuizAttempts::find_by_id(attempt_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to load attempt"))?
            .ok_or_else(|| DlmsError::not_found(format!("Attempt {attempt_id} not found")))?;

        if attempt.status != AttemptStatus::IN_PROGRESS {
            return Err(DlmsError::conflict("Attempt already submitted"));
        }

        let questions: Vec<QuizQuestion> = load_questions(&txn, attempt.quiz_id)
            .await?
            .into_iter()
            .map(|m| m.into_question())
            .collect();
        let answers: Vec<QuizAnswer> = load_answers(&txn, attempt_id)
            .await?
            .into_iter()
            .map(|m| m.into_answer())
            .collect();

        let scored = scoring::score_answers(&questions, &answers);
        for item in &scored {
            let Some(answer_id) = item.answer_id else {
                continue;
            };
            QuizAnswers::update_many()
                .col_expr(quiz_answers::Column::IsCorrect, Expr::value(item.is_correct))
                .col_expr(
                    quiz_answers::Column::PointsAwarded,
                    Expr::value(item.points_awarded),
                )
                .filter(quiz_answers::Column::Id.eq(answer_id))
                .exec(&txn)
                .await
                .map_err(db_error("Failed to score answer"))?;
        }

        let score: i32 = scored.iter().map(|s| s.points_awarded).sum();
        let max_score = scoring::total_points(&questions);

        let flipped = QuizAttempts::update_many()
            .col_expr(
                quiz_attempts::Column::Status,
                Expr::value(AttemptStatus::SUBMITTED),
            )
            .col_expr(quiz_attempts::Column::Score, Expr::value(score))
            .col_expr(quiz_attempts::Column::MaxScore, Expr::value(max_score))
            .col_expr(
                quiz_attempts::Column::SubmittedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(quiz_attempts::Column::Id.eq(attempt_id))
            .filter(quiz_attempts::Column::Status.eq(AttemptStatus::IN_PROGRESS))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to submit attempt"))?;

        if flipped.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(db_error("Failed to roll back submission"))?;
            return Err(DlmsError::conflict("Attempt already submitted"));
        }

        let submitted = QuizAttempts::find_by_id(attempt_id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load attempt"))?
            .ok_or_else(|| DlmsError::not_found(format!("Attempt {attempt_id} not found")))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit submission"))?;

        Ok(submitted.into_attempt())
    }

    /// Attempts on a quiz with the student names
    pub async fn list_attempts_impl(&self, quiz_id: i64) -> Result<Vec<AttemptListItem>> {
        let rows = QuizAttempts::find()
            .filter(quiz_attempts::Column::QuizId.eq(quiz_id))
            .find_also_related(Users)
            .order_by_asc(quiz_attempts::Column::StartedAt)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list attempts"))?;

        Ok(rows
            .into_iter()
            .map(|(attempt, student)| {
                let attempt = attempt.into_attempt();
                AttemptListItem {
                    percentage: attempt.percentage(),
                    student_name: student.map(|u| u.full_name).unwrap_or_default(),
                    attempt,
                }
            })
            .collect())
    }

    pub async fn list_student_attempts_impl(&self, student_id: i64) -> Result<Vec<QuizAttempt>> {
        let rows = QuizAttempts::find()
            .filter(quiz_attempts::Column::StudentId.eq(student_id))
            .order_by_desc(quiz_attempts::Column::StartedAt)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list attempts"))?;

        Ok(rows.into_iter().map(|m| m.into_attempt()).collect())
    }
}

async fn load_questions<C: ConnectionTrait>(
    conn: &C,
    quiz_id: i64,
) -> Result<Vec<QuizQuestionModel>> {
    QuizQuestions::find()
        .filter(quiz_questions::Column::QuizId.eq(quiz_id))
        .order_by_asc(quiz_questions::Column::Position)
        .order_by_asc(quiz_questions::Column::Id)
        .all(conn)
        .await
        .map_err(db_error("Failed to load questions"))
}

async fn overwrite_answer<C: ConnectionTrait>(
    conn: &C,
    attempt_id: i64,
    question_id: i64,
    answer: &str,
) -> Result<Option<QuizAnswer>> {
    let Some(existing) = QuizAnswers::find()
        .filter(quiz_answers::Column::AttemptId.eq(attempt_id))
        .filter(quiz_answers::Column::QuestionId.eq(question_id))
        .one(conn)
        .await
        .map_err(db_error("Failed to load answer"))?
    else {
        return Ok(None);
    };

    let mut model: QuizAnswerActiveModel = existing.into();
    model.answer = Set(answer.to_string());

    let updated = model
        .update(conn)
        .await
        .map_err(db_error("Failed to save answer"))?;

    Ok(Some(updated.into_answer()))
}

async fn load_answers<C: ConnectionTrait>(conn: &C, attempt_id: i64) -> Result<Vec<QuizAnswerModel>> {
    QuizAnswers::find()
        .filter(quiz_answers::Column::AttemptId.eq(attempt_id))
        .all(conn)
        .await
        .map_err(db_error("Failed to load answers"))
}
