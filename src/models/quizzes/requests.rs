use super::entities::QuestionType;
use crate::models::academics::requests::AudienceScope;
use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
use crate::models::common::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub grade_level: GradeLevel,
    pub section: Option<Section>,
    pub time_limit_minutes: Option<i32>,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionRequest {
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default = "default_points")]
    pub points: i32,
    /// Appended at the end when omitted
    pub position: Option<i32>,
}

fn default_points() -> i32 {
    1
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuizListQuery {
    pub page: u64,
    pub size: u64,
    pub scope: AudienceScope,
    /// Published and inside the availability window at this moment
    pub open_at: Option<DateTime<Utc>>,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SaveAnswerRequest {
    pub question_id: i64,
    pub answer: String,
}

/// Validated question ready for storage
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: i32,
    pub position: Option<i32>,
}

impl QuestionRequest {
    pub fn validate(self) -> Result<NewQuestion, String> {
        let (options, correct_answer) = super::scoring::validate_question(
            self.question_type,
            &self.question_text,
            self.options,
            &self.correct_answer,
            self.points,
        )?;
        Ok(NewQuestion {
            question_text: self.question_text.trim().to_string(),
            question_type: self.question_type,
            options,
            correct_answer,
            points: self.points,
            position: self.position,
        })
    }
}
