use crate::models::academics::taxonomy::Subject;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradeRequest {
    pub student_id: i64,
    pub subject: Subject,
    pub term: i32,
    pub academic_year: i32,
    pub score: f64,
    pub max_score: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListParams {
    pub term: Option<i32>,
    pub academic_year: Option<i32>,
    pub subject: Option<Subject>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCardParams {
    pub term: i32,
    pub academic_year: i32,
}
