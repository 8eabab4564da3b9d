use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{UserListParams, UserListQuery};
use crate::services::{internal, ok};

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    query: UserListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let users = storage
        .list_users_with_pagination(UserListQuery::from(query))
        .await
        .map_err(internal("Failed to list users"))?;

    ok(users, "Users retrieved")
}
