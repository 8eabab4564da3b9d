use crate::models::academics::taxonomy::{GradeLevel, Subject};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub description: Option<String>,
    pub file_token: Option<String>,
    pub cover_url: Option<String>,
    pub total_pages: i32,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub description: Option<String>,
    pub file_token: Option<String>,
    pub cover_url: Option<String>,
    pub total_pages: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookListQuery {
    pub page: u64,
    pub size: u64,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub search: Option<String>,
}

impl From<BookListParams> for BookListQuery {
    fn from(params: BookListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            subject: params.subject,
            grade_level: params.grade_level,
            search: params.search,
        }
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct UpdateProgressRequest {
    pub current_page: i32,
}
