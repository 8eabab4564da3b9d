use super::taxonomy::{GradeLevel, Section, Stream, Subject};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub grade_level: Option<GradeLevel>,
    pub section: Option<Section>,
    pub stream: Option<Stream>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub grade_level: Option<GradeLevel>,
    pub section: Option<Section>,
    pub stream: Option<Stream>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            grade_level: params.grade_level,
            section: params.section,
            stream: params.stream,
            search: params.search,
        }
    }
}

/// Which class-targeted rows (assignments, quizzes) a viewer may list
#[derive(Debug, Clone)]
pub enum AudienceScope {
    All,
    /// Rows created by this teacher
    Teacher(i64),
    /// Rows for the grade aimed at the section or at every section
    Class {
        grade_level: GradeLevel,
        section: Section,
    },
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdatePlacementRequest {
    pub grade_level: GradeLevel,
    pub section: Section,
    pub stream: Option<Stream>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateTeacherAssignmentRequest {
    pub teacher_id: i64,
    pub grade_level: GradeLevel,
    pub section: Section,
    pub subject: Subject,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct TeacherAssignmentListParams {
    pub teacher_id: Option<i64>,
    pub grade_level: Option<GradeLevel>,
    pub section: Option<Section>,
    pub subject: Option<Subject>,
}
