use crate::models::users::entities::UserRole;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MAX_BODY_CHARS: usize = 5000;
pub const MAX_SUBJECT_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: Option<String>,
    pub body: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The other side of a conversation
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct Correspondent {
    pub id: i64,
    pub full_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: Message,
    pub sender: Correspondent,
    pub recipient: Correspondent,
}
