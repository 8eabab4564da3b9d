use super::entities::News;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub news: News,
    pub author_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsListResponse {
    pub items: Vec<NewsItem>,
    pub pagination: PaginationInfo,
}
