use super::entities::{QuestionType, Quiz, QuizAnswer, QuizAttempt, QuizQuestion};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// Question as shown to a viewer; the answer key is hidden from students
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionView {
    pub id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub points: i32,
    pub position: i32,
    pub correct_answer: Option<String>,
}

impl QuestionView {
    pub fn from_question(question: QuizQuestion, reveal_answer: bool) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            question_type: question.question_type,
            options: question.options,
            points: question.points,
            position: question.position,
            correct_answer: reveal_answer.then_some(question.correct_answer),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub questions: Vec<QuestionView>,
    pub total_points: i32,
    /// The viewer's attempt, students only
    pub my_attempt: Option<QuizAttempt>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub quiz: Quiz,
    pub question_count: i64,
    pub my_attempt: Option<QuizAttempt>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<QuizListItem>,
    pub pagination: PaginationInfo,
}

/// Attempt in progress with the questions and saved answers
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptSession {
    pub attempt: QuizAttempt,
    pub questions: Vec<QuestionView>,
    pub answers: Vec<QuizAnswer>,
    pub answer_deadline: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AnswerBreakdown {
    pub question_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points: i32,
    pub points_awarded: i32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptResultResponse {
    pub attempt: QuizAttempt,
    pub quiz: Quiz,
    pub percentage: f64,
    pub breakdown: Vec<AnswerBreakdown>,
}

impl AttemptResultResponse {
    pub fn build(
        attempt: QuizAttempt,
        quiz: Quiz,
        questions: Vec<QuizQuestion>,
        answers: Vec<QuizAnswer>,
    ) -> Self {
        let breakdown = questions
            .into_iter()
            .map(|question| {
                let answer = answers.iter().find(|a| a.question_id == question.id);
                AnswerBreakdown {
                    question_id: question.id,
                    question_text: question.question_text,
                    question_type: question.question_type,
                    options: question.options,
                    your_answer: answer.map(|a| a.answer.clone()),
                    correct_answer: question.correct_answer,
                    is_correct: answer.and_then(|a| a.is_correct).unwrap_or(false),
                    points: question.points,
                    points_awarded: answer.and_then(|a| a.points_awarded).unwrap_or(0),
                }
            })
            .collect();

        Self {
            percentage: attempt.percentage().unwrap_or(0.0),
            attempt,
            quiz,
            breakdown,
        }
    }
}

/// Attempt joined with the student, for teacher views
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub attempt: QuizAttempt,
    pub student_name: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListResponse {
    pub items: Vec<AttemptListItem>,
}
