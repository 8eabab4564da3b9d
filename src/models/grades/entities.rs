use crate::models::academics::taxonomy::Subject;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const TERMS: [i32; 2] = [1, 2];

/// A recorded mark for one subject in one term
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject: Subject,
    pub term: i32,
    pub academic_year: i32,
    pub score: f64,
    pub max_score: f64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl GradeRecord {
    pub fn percentage(&self) -> f64 {
        crate::utils::percent::percentage(self.score, self.max_score)
    }
}
