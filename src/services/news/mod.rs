//! School news posts aimed at an audience

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{access, created, current_user, internal, invalid, not_found, ok, ok_empty};
use crate::models::{
    ErrorCode,
    news::requests::{CreateNewsRequest, NewsListParams, NewsListQuery, UpdateNewsRequest},
    users::entities::UserRole,
};
use crate::utils::validate::validate_text_len;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_BODY_CHARS: usize = 20_000;

define_service!(NewsService);

impl NewsService {
    pub async fn create(
        &self,
        request: &HttpRequest,
        mut news: CreateNewsRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        validate_text_len(&news.title, "Title", 1, MAX_TITLE_CHARS)
            .and_then(|_| validate_text_len(&news.body, "Body", 1, MAX_BODY_CHARS))
            .map_err(invalid(ErrorCode::BadRequest))?;
        news.title = news.title.trim().to_string();

        let news = storage
            .create_news(user.id, news)
            .await
            .map_err(internal("Failed to create news"))?;

        info!("User {} posted news {} for {}", user.id, news.id, news.audience);
        created(news, "News created")
    }

    /// Admins list everything; others see what is published for them plus their own posts
    pub async fn list(
        &self,
        request: &HttpRequest,
        params: NewsListParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let (page, size) = params.pagination.normalized();
        let viewer = (user.role != UserRole::Admin).then_some((user.id, user.role));
        let news = storage
            .list_news(NewsListQuery {
                page,
                size,
                viewer,
                audience: params.audience,
                search: params.search,
            })
            .await
            .map_err(internal("Failed to list news"))?;

        ok(news, "News retrieved")
    }

    pub async fn get(&self, request: &HttpRequest, news_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let item = storage
            .get_news(news_id)
            .await
            .map_err(internal("Failed to load news"))?
            .filter(|item| item.news.is_visible_to(user.id, user.role))
            .ok_or_else(|| not_found(ErrorCode::NewsNotFound, "News not found"))?;

        ok(item, "News retrieved")
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        news_id: i64,
        mut update: UpdateNewsRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let item = storage
            .get_news(news_id)
            .await
            .map_err(internal("Failed to load news"))?
            .ok_or_else(|| not_found(ErrorCode::NewsNotFound, "News not found"))?;
        access::ensure_owner(&user, item.news.author_id, ErrorCode::Forbidden, "news")?;

        if let Some(title) = &update.title {
            validate_text_len(title, "Title", 1, MAX_TITLE_CHARS)
                .map_err(invalid(ErrorCode::BadRequest))?;
        }
        if let Some(body) = &update.body {
            validate_text_len(body, "Body", 1, MAX_BODY_CHARS)
                .map_err(invalid(ErrorCode::BadRequest))?;
        }
        update.title = update.title.map(|t| t.trim().to_string());

        let news = storage
            .update_news(news_id, update)
            .await
            .map_err(internal("Failed to update news"))?
            .ok_or_else(|| not_found(ErrorCode::NewsNotFound, "News not found"))?;

        ok(news, "News updated")
    }

    pub async fn delete(&self, request: &HttpRequest, news_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let item = storage
            .get_news(news_id)
            .await
            .map_err(internal("Failed to load news"))?
            .ok_or_else(|| not_found(ErrorCode::NewsNotFound, "News not found"))?;
        access::ensure_owner(&user, item.news.author_id, ErrorCode::Forbidden, "news")?;

        let deleted = storage
            .delete_news(news_id)
            .await
            .map_err(internal("Failed to delete news"))?;
        if !deleted {
            return Err(not_found(ErrorCode::NewsNotFound, "News not found"));
        }

        info!("User {} deleted news {}", user.id, news_id);
        ok_empty("News deleted")
    }
}
