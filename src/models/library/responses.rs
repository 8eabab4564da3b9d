use super::entities::{Book, ReadingProgress};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookListResponse {
    pub items: Vec<Book>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookDetailResponse {
    pub book: Book,
    pub my_progress: Option<ReadingProgress>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct ProgressItem {
    pub progress: ReadingProgress,
    pub book: Book,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct ProgressListResponse {
    pub items: Vec<ProgressItem>,
}
