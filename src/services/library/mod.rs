//! Digital library books and per-reader progress

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{access, bad_request, created, current_user, internal, invalid, not_found, ok, ok_empty};
use crate::models::{
    ErrorCode,
    library::{
        entities::{Book, ProgressPosition},
        requests::{BookListParams, CreateBookRequest, UpdateBookRequest, UpdateProgressRequest},
        responses::{BookDetailResponse, ProgressListResponse},
    },
};
use crate::storage::Storage;
use crate::utils::validate::validate_text_len;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MAX_PAGES: i32 = 100_000;

define_service!(LibraryService);

fn validate_pages(total_pages: i32) -> Result<(), String> {
    if !(1..=MAX_PAGES).contains(&total_pages) {
        return Err(format!("Total pages must be between 1 and {MAX_PAGES}"));
    }
    Ok(())
}

async fn load_book(storage: &Arc<dyn Storage>, book_id: i64) -> ActixResult<Book> {
    storage
        .get_book(book_id)
        .await
        .map_err(internal("Failed to load book"))?
        .ok_or_else(|| not_found(ErrorCode::BookNotFound, "Book not found"))
}

impl LibraryService {
    pub async fn create_book(
        &self,
        request: &HttpRequest,
        mut book: CreateBookRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        validate_text_len(&book.title, "Title", 1, MAX_TITLE_CHARS)
            .and_then(|_| validate_text_len(&book.author, "Author", 1, MAX_AUTHOR_CHARS))
            .and_then(|_| validate_pages(book.total_pages))
            .map_err(invalid(ErrorCode::BadRequest))?;
        access::ensure_file_exists(&storage, book.file_token.as_deref()).await?;

        book.title = book.title.trim().to_string();
        book.author = book.author.trim().to_string();
        let book = storage
            .create_book(user.id, book)
            .await
            .map_err(internal("Failed to create book"))?;

        info!("User {} added book {} to the library", user.id, book.id);
        created(book, "Book added")
    }

    pub async fn list_books(
        &self,
        request: &HttpRequest,
        query: BookListParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let books = storage
            .list_books(query.into())
            .await
            .map_err(internal("Failed to list books"))?;

        ok(books, "Books retrieved")
    }

    pub async fn get_book(&self, request: &HttpRequest, book_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let book = load_book(&storage, book_id).await?;
        let my_progress = storage
            .get_progress(book.id, user.id)
            .await
            .map_err(internal("Failed to load reading progress"))?;

        ok(BookDetailResponse { book, my_progress }, "Book retrieved")
    }

    pub async fn update_book(
        &self,
        request: &HttpRequest,
        book_id: i64,
        mut update: UpdateBookRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let book = load_book(&storage, book_id).await?;
        access::ensure_owner(&user, book.uploaded_by, ErrorCode::Forbidden, "books")?;

        if let Some(title) = &update.title {
            validate_text_len(title, "Title", 1, MAX_TITLE_CHARS)
                .map_err(invalid(ErrorCode::BadRequest))?;
        }
        if let Some(author) = &update.author {
            validate_text_len(author, "Author", 1, MAX_AUTHOR_CHARS)
                .map_err(invalid(ErrorCode::BadRequest))?;
        }
        if let Some(pages) = update.total_pages {
            validate_pages(pages).map_err(invalid(ErrorCode::BadRequest))?;
        }
        access::ensure_file_exists(&storage, update.file_token.as_deref()).await?;
        update.title = update.title.map(|t| t.trim().to_string());
        update.author = update.author.map(|a| a.trim().to_string());

        let book = storage
            .update_book(book_id, update)
            .await
            .map_err(internal("Failed to update book"))?
            .ok_or_else(|| not_found(ErrorCode::BookNotFound, "Book not found"))?;

        ok(book, "Book updated")
    }

    pub async fn delete_book(&self, request: &HttpRequest, book_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let book = load_book(&storage, book_id).await?;
        access::ensure_owner(&user, book.uploaded_by, ErrorCode::Forbidden, "books")?;

        let deleted = storage
            .delete_book(book_id)
            .await
            .map_err(internal("Failed to delete book"))?;
        if !deleted {
            return Err(not_found(ErrorCode::BookNotFound, "Book not found"));
        }

        info!("User {} removed book {}", user.id, book_id);
        ok_empty("Book deleted")
    }

    /// Pages beyond the book are clamped; reaching the last page completes it
    pub async fn update_progress(
        &self,
        request: &HttpRequest,
        book_id: i64,
        progress: UpdateProgressRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let book = load_book(&storage, book_id).await?;
        if book.total_pages <= 0 {
            return Err(bad_request(
                ErrorCode::BadRequest,
                "This book has no pages to track",
            ));
        }

        let position = ProgressPosition::compute(progress.current_page, book.total_pages);
        let progress = storage
            .upsert_progress(book.id, user.id, position)
            .await
            .map_err(internal("Failed to save reading progress"))?;

        ok(progress, "Reading progress saved")
    }

    pub async fn my_progress(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let items = storage
            .list_progress(user.id)
            .await
            .map_err(internal("Failed to list reading progress"))?;

        ok(ProgressListResponse { items }, "Reading progress retrieved")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_bounds() {
        assert!(validate_pages(320).is_ok());
        assert!(validate_pages(0).is_err());
        assert!(validate_pages(MAX_PAGES + 1).is_err());
    }
}
