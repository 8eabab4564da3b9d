//! School news

use super::{SeaOrmStorage, db_error};
use crate::entity::news::Column;
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    news::{
        entities::{Audience, News},
        requests::{CreateNewsRequest, NewsListQuery, UpdateNewsRequest},
        responses::{NewsItem, NewsListResponse},
    },
    users::entities::UserRole,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// Rows a non-admin viewer may read: their own posts plus published posts for their audience
fn visible_to(viewer_id: i64, role: UserRole) -> Option<Condition> {
    let audience = Audience::for_role(role)?;
    Some(
        Condition::any().add(Column::AuthorId.eq(viewer_id)).add(
            Condition::all().add(Column::IsPublished.eq(true)).add(
                Column::Audience.is_in([Audience::All.to_string(), audience.to_string()]),
            ),
        ),
    )
}

impl SeaOrmStorage {
    pub async fn create_news_impl(&self, author_id: i64, req: CreateNewsRequest) -> Result<News> {
        let now = chrono::Utc::now().timestamp();

        let model = NewsActiveModel {
            author_id: Set(author_id),
            title: Set(req.title.trim().to_string()),
            body: Set(req.body),
            audience: Set(req.audience.to_string()),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create news"))?;

        Ok(result.into_news())
    }

    pub async fn get_news_impl(&self, id: i64) -> Result<Option<NewsItem>> {
        let result = NewsEntries::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load news"))?;

        Ok(result.map(|(news, author)| NewsItem {
            news: news.into_news(),
            author_name: author.map(|u| u.full_name).unwrap_or_default(),
        }))
    }

    pub async fn update_news_impl(&self, id: i64, update: UpdateNewsRequest) -> Result<Option<News>> {
        let Some(existing) = NewsEntries::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load news"))?
        else {
            return Ok(None);
        };

        let mut model: NewsActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(body) = update.body {
            model.body = Set(body);
        }
        if let Some(audience) = update.audience {
            model.audience = Set(audience.to_string());
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update news"))?;

        Ok(Some(updated.into_news()))
    }

    pub async fn delete_news_impl(&self, id: i64) -> Result<bool> {
        let result = NewsEntries::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete news"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_news_impl(&self, query: NewsListQuery) -> Result<NewsListResponse> {
        let mut select = NewsEntries::find();

        if let Some((viewer_id, role)) = query.viewer
            && let Some(condition) = visible_to(viewer_id, role)
        {
            select = select.filter(condition);
        }
        if let Some(audience) = query.audience {
            select = select.filter(Column::Audience.eq(audience.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Body.contains(&escaped)),
            );
        }

        let paginator = select
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count news"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list news"))?;

        let items = rows
            .into_iter()
            .map(|(news, author)| NewsItem {
                news: news.into_news(),
                author_name: author.map(|u| u.full_name).unwrap_or_default(),
            })
            .collect();

        Ok(NewsListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admins_are_unfiltered() {
        assert!(visible_to(1, UserRole::Admin).is_none());
        assert!(visible_to(1, UserRole::Parent).is_some());
    }
}
