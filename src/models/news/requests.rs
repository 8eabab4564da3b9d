use super::entities::Audience;
use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
    #[serde(default = "default_audience")]
    pub audience: Audience,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_audience() -> Audience {
    Audience::All
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub audience: Option<Audience>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub audience: Option<Audience>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewsListQuery {
    pub page: u64,
    pub size: u64,
    /// Restricts to what this viewer may read; None lists everything
    pub viewer: Option<(i64, UserRole)>,
    pub audience: Option<Audience>,
    pub search: Option<String>,
}
