use crate::models::academics::entities::StudentSummary;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub enum LinkStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Pending => write!(f, "pending"),
            LinkStatus::Approved => write!(f, "approved"),
            LinkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for LinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LinkStatus::Pending),
            "approved" => Ok(LinkStatus::Approved),
            "rejected" => Ok(LinkStatus::Rejected),
            _ => Err(format!("Invalid link status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ParentChildLink {
    pub id: i64,
    pub parent_id: i64,
    pub student_id: i64,
    pub relationship: Option<String>,
    pub status: LinkStatus,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Link joined with both parties, for review screens
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ParentChildLinkDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub link: ParentChildLink,
    pub parent_name: String,
    pub parent_email: String,
    pub student: StudentSummary,
}
