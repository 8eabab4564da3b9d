use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::news::requests::{CreateNewsRequest, NewsListParams, UpdateNewsRequest};
use crate::models::users::entities::UserRole;
use crate::services::NewsService;
use crate::utils::SafeIDI64;

static NEWS_SERVICE: Lazy<NewsService> = Lazy::new(NewsService::new_lazy);

pub async fn list_news(
    req: HttpRequest,
    query: web::Query<NewsListParams>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.list(&req, query.into_inner()).await
}

pub async fn create_news(
    req: HttpRequest,
    body: web::Json<CreateNewsRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.create(&req, body.into_inner()).await
}

pub async fn get_news(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.get(&req, id.0).await
}

pub async fn update_news(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateNewsRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.update(&req, id.0, body.into_inner()).await
}

pub async fn delete_news(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.delete(&req, id.0).await
}

pub fn configure_news_routes(cfg: &mut web::ServiceConfig) {
    let staff = || RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/news")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_news))
                    .route(web::post().to(create_news).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_news))
                    .route(web::put().to(update_news).wrap(staff()))
                    .route(web::delete().to(delete_news).wrap(staff())),
            ),
    );
}
