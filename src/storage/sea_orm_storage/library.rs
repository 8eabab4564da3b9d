//! Library books and reading progress

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{books, reading_progress};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    library::{
        entities::{Book, ProgressPosition, ReadingProgress},
        requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
        responses::{BookListResponse, ProgressItem},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    pub async fn create_book_impl(&self, uploader_id: i64, req: CreateBookRequest) -> Result<Book> {
        let now = chrono::Utc::now().timestamp();

        let model = BookActiveModel {
            title: Set(req.title.trim().to_string()),
            author: Set(req.author.trim().to_string()),
            subject: Set(req.subject.map(|s| s.to_string())),
            grade_level: Set(req.grade_level.map(|g| g.value())),
            description: Set(non_blank(req.description)),
            file_token: Set(non_blank(req.file_token)),
            cover_url: Set(non_blank(req.cover_url)),
            total_pages: Set(req.total_pages),
            uploaded_by: Set(uploader_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create book"))?;

        Ok(result.into_book())
    }

    pub async fn get_book_impl(&self, id: i64) -> Result<Option<Book>> {
        let result = Books::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load book"))?;

        Ok(result.map(|m| m.into_book()))
    }

    pub async fn update_book_impl(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        let Some(existing) = Books::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load book"))?
        else {
            return Ok(None);
        };

        let mut model: BookActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(author) = update.author {
            model.author = Set(author.trim().to_string());
        }
        if let Some(subject) = update.subject {
            model.subject = Set(Some(subject.to_string()));
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(Some(grade_level.value()));
        }
        if update.description.is_some() {
            model.description = Set(non_blank(update.description));
        }
        if update.file_token.is_some() {
            model.file_token = Set(non_blank(update.file_token));
        }
        if update.cover_url.is_some() {
            model.cover_url = Set(non_blank(update.cover_url));
        }
        if let Some(total_pages) = update.total_pages {
            model.total_pages = Set(total_pages);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update book"))?;

        Ok(Some(updated.into_book()))
    }

    pub async fn delete_book_impl(&self, id: i64) -> Result<bool> {
        let result = Books::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete book"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_books_impl(&self, query: BookListQuery) -> Result<BookListResponse> {
        let mut select = Books::find();

        if let Some(subject) = query.subject {
            select = select.filter(books::Column::Subject.eq(subject.to_string()));
        }
        if let Some(grade_level) = query.grade_level {
            select = select.filter(books::Column::GradeLevel.eq(grade_level.value()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(books::Column::Title.contains(&escaped))
                    .add(books::Column::Author.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(books::Column::Title)
            .order_by_asc(books::Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count books"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list books"))?;

        Ok(BookListResponse {
            items: rows.into_iter().map(|m| m.into_book()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    /// One progress row per (book, user); later reports overwrite it
    pub async fn upsert_progress_impl(
        &self,
        book_id: i64,
        user_id: i64,
        position: ProgressPosition,
    ) -> Result<ReadingProgress> {
        if let Some(updated) = self.overwrite_progress(book_id, user_id, position).await? {
            return Ok(updated);
        }

        let model = ReadingProgressActiveModel {
            book_id: Set(book_id),
            user_id: Set(user_id),
            current_page: Set(position.current_page),
            progress_percent: Set(position.progress_percent),
            completed: Set(position.completed),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to save reading progress"))
        {
            Ok(row) => Ok(row.into_progress()),
            Err(e) if e.is_conflict() => self
                .overwrite_progress(book_id, user_id, position)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }

    async fn overwrite_progress(
        &self,
        book_id: i64,
        user_id: i64,
        position: ProgressPosition,
    ) -> Result<Option<ReadingProgress>> {
        let Some(existing) = self.find_progress_row(book_id, user_id).await? else {
            return Ok(None);
        };

        let mut model: ReadingProgressActiveModel = existing.into();
        model.current_page = Set(position.current_page);
        model.progress_percent = Set(position.progress_percent);
        model.completed = Set(position.completed);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to save reading progress"))?;

        Ok(Some(updated.into_progress()))
    }

    async fn find_progress_row(
        &self,
        book_id: i64,
        user_id: i64,
    ) -> Result<Option<ReadingProgressModel>> {
        ReadingProgresses::find()
            .filter(reading_progress::Column::BookId.eq(book_id))
            .filter(reading_progress::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load reading progress"))
    }

    pub async fn get_progress_impl(
        &self,
        book_id: i64,
        user_id: i64,
    ) -> Result<Option<ReadingProgress>> {
        Ok(self
            .find_progress_row(book_id, user_id)
            .await?
            .map(|m| m.into_progress()))
    }

    /// The user's shelf, most recently read first
    pub async fn list_progress_impl(&self, user_id: i64) -> Result<Vec<ProgressItem>> {
        let rows = ReadingProgresses::find()
            .filter(reading_progress::Column::UserId.eq(user_id))
            .find_also_related(Books)
            .order_by_desc(reading_progress::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list reading progress"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(progress, book)| {
                book.map(|b| ProgressItem {
                    progress: progress.into_progress(),
                    book: b.into_book(),
                })
            })
            .collect())
    }
}
