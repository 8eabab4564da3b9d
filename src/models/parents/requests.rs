use super::entities::LinkStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct RequestLinkRequest {
    pub fav_id: String,
    /// e.g. "mother", "guardian"
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub enum LinkDecision {
    Approve,
    Reject,
}

impl LinkDecision {
    pub fn resulting_status(self) -> LinkStatus {
        match self {
            LinkDecision::Approve => LinkStatus::Approved,
            LinkDecision::Reject => LinkStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ReviewLinkRequest {
    pub decision: LinkDecision,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct LinkListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<LinkStatus>,
}

#[derive(Debug, Clone)]
pub struct LinkListQuery {
    pub page: u64,
    pub size: u64,
    pub parent_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<LinkStatus>,
}
