use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::library::requests::{
    BookListParams, CreateBookRequest, UpdateBookRequest, UpdateProgressRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LibraryService;
use crate::utils::SafeIDI64;

static LIBRARY_SERVICE: Lazy<LibraryService> = Lazy::new(LibraryService::new_lazy);

pub async fn list_books(
    req: HttpRequest,
    query: web::Query<BookListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_books(&req, query.into_inner()).await
}

pub async fn create_book(
    req: HttpRequest,
    body: web::Json<CreateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.create_book(&req, body.into_inner()).await
}

pub async fn get_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_book(&req, id.0).await
}

pub async fn update_book(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.update_book(&req, id.0, body.into_inner()).await
}

pub async fn delete_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.delete_book(&req, id.0).await
}

pub async fn update_progress(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE
        .update_progress(&req, id.0, body.into_inner())
        .await
}

pub async fn my_progress(req: HttpRequest) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.my_progress(&req).await
}

pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    let teachers = || RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/library")
            .wrap(RateLimit::api())
            .wrap(RequireJWT)
            .route("/progress", web::get().to(my_progress))
            .service(
                web::resource("/books")
                    .route(web::get().to(list_books))
                    .route(web::post().to(create_book).wrap(teachers())),
            )
            .service(
                web::resource("/books/{id}")
                    .route(web::get().to(get_book))
                    .route(web::put().to(update_book).wrap(teachers()))
                    .route(web::delete().to(delete_book).wrap(teachers())),
            )
            .route("/books/{id}/progress", web::put().to(update_progress)),
    );
}
