use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::ErrorCode;
use crate::services::{bad_request, current_user, internal, not_found, ok_empty};

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if admin.id == user_id {
        return Err(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "You cannot delete your own account",
        ));
    }

    let deleted = storage
        .delete_user(user_id)
        .await
        .map_err(internal("Failed to delete user"))?;
    if !deleted {
        return Err(not_found(ErrorCode::UserNotFound, "User not found"));
    }

    info!("Admin {} deleted user {}", admin.id, user_id);
    ok_empty("User deleted")
}
