use super::entities::User;
use crate::models::academics::entities::AccountProfile;
use crate::models::academics::taxonomy::FavId;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// Admin view of one account with its role profile
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserDetailResponse {
    pub user: User,
    pub profile: AccountProfile,
}

/// Directory row; students also show the FAV ID staff look them up by
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    pub fav_id: Option<FavId>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<UserListItem>,
    pub pagination: PaginationInfo,
}
