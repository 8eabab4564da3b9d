use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub grade_level: GradeLevel,
    pub section: Option<Section>,
    pub time_limit_minutes: Option<i32>,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Inside the availability window
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.available_from.is_none_or(|from| now >= from)
            && self.available_until.is_none_or(|until| now <= until)
    }

    /// Moment after which answers are no longer accepted for an attempt
    pub fn answer_deadline(&self, started_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let by_limit = self
            .time_limit_minutes
            .map(|minutes| started_at + Duration::minutes(minutes as i64));
        match (by_limit, self.available_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Choices, multiple choice only
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum AttemptStatus {
    InProgress,
    Submitted,
}

impl AttemptStatus {
    pub const IN_PROGRESS: &'static str = "in_progress";
    pub const SUBMITTED: &'static str = "submitted";
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "{}", AttemptStatus::IN_PROGRESS),
            AttemptStatus::Submitted => write!(f, "{}", AttemptStatus::SUBMITTED),
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AttemptStatus::IN_PROGRESS => Ok(AttemptStatus::InProgress),
            AttemptStatus::SUBMITTED => Ok(AttemptStatus::Submitted),
            _ => Err(format!("Invalid attempt status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub status: AttemptStatus,
    pub score: Option<i32>,
    pub max_score: i32,
    pub started_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    pub fn percentage(&self) -> Option<f64> {
        self.score
            .map(|score| crate::utils::percent::percentage(score as f64, self.max_score as f64))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizAnswer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer: String,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> Quiz {
        let now = Utc::now();
        Quiz {
            id: 1,
            teacher_id: 2,
            title: "Cell biology".into(),
            description: None,
            subject: Subject::Biology,
            grade_level: GradeLevel::try_from(9).unwrap(),
            section: None,
            time_limit_minutes: None,
            available_from: None,
            available_until: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_open_window() {
        let now = Utc::now();
        let mut q = quiz();
        assert!(q.is_open(now));
        q.available_from = Some(now + Duration::hours(1));
        assert!(!q.is_open(now));
        q.available_from = Some(now - Duration::hours(2));
        q.available_until = Some(now - Duration::hours(1));
        assert!(!q.is_open(now));
    }

    #[test]
    fn test_answer_deadline_takes_earliest_bound() {
        let start = Utc::now();
        let mut q = quiz();
        assert_eq!(q.answer_deadline(start), None);
        q.time_limit_minutes = Some(30);
        assert_eq!(q.answer_deadline(start), Some(start + Duration::minutes(30)));
        q.available_until = Some(start + Duration::minutes(10));
        assert_eq!(q.answer_deadline(start), Some(start + Duration::minutes(10)));
    }
}
