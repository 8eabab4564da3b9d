use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::parents::requests::{LinkListParams, RequestLinkRequest, ReviewLinkRequest};
use crate::models::users::entities::UserRole;
use crate::services::ParentService;
use crate::utils::SafeIDI64;

static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);

pub async fn request_link(
    req: HttpRequest,
    body: web::Json<RequestLinkRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.request_link(&req, body.into_inner()).await
}

pub async fn list_links(
    req: HttpRequest,
    query: web::Query<LinkListParams>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_links(&req, query.into_inner()).await
}

pub async fn review_link(
    req: HttpRequest,
    link_id: SafeIDI64,
    body: web::Json<ReviewLinkRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .review_link(&req, link_id.0, body.into_inner())
        .await
}

pub async fn remove_link(req: HttpRequest, link_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.remove_link(&req, link_id.0).await
}

pub async fn list_children(req: HttpRequest) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_children(&req).await
}

pub fn configure_parent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/parents")
            .wrap(RequireRole::new_any(&[&UserRole::Parent, &UserRole::Admin]))
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("/links")
                    .route(web::get().to(list_links))
                    .route(
                        web::post()
                            .to(request_link)
                            .wrap(RequireRole::new_any(UserRole::parent_roles())),
                    ),
            )
            .route("/links/{id}", web::delete().to(remove_link))
            .service(
                web::resource("/links/{id}/review")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::put().to(review_link)),
            )
            .service(
                web::resource("/children")
                    .wrap(RequireRole::new_any(UserRole::parent_roles()))
                    .route(web::get().to(list_children)),
            ),
    );
}
