use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ErrorCode, users::responses::UserDetailResponse};
use crate::services::{internal, not_found, ok};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;
    let profile = storage
        .get_account_profile(user.id, user.role)
        .await
        .map_err(internal("Failed to load account profile"))?;

    ok(UserDetailResponse { user, profile }, "User retrieved")
}
