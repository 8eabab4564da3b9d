use super::entities::{ParentChildLink, ParentChildLinkDetail};
use crate::models::academics::entities::StudentSummary;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct LinkListResponse {
    pub items: Vec<ParentChildLinkDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildSummary {
    pub link: ParentChildLink,
    pub student: StudentSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildrenResponse {
    pub items: Vec<ChildSummary>,
}
