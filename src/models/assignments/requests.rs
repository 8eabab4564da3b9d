use crate::models::academics::requests::AudienceScope;
use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
use crate::models::common::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub grade_level: GradeLevel,
    pub section: Option<Section>,
    /// ISO 8601, e.g. "2026-01-24T12:00:00Z"
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: f64,
    #[serde(default)]
    pub allow_late: bool,
    pub attachment_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<f64>,
    pub allow_late: Option<bool>,
    pub attachment_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: u64,
    pub size: u64,
    pub scope: AudienceScope,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub content: Option<String>,
    pub file_token: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<super::entities::SubmissionStatus>,
}
