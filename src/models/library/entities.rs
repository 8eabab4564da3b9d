use crate::models::academics::taxonomy::{GradeLevel, Subject};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub subject: Option<Subject>,
    pub grade_level: Option<GradeLevel>,
    pub description: Option<String>,
    pub file_token: Option<String>,
    pub cover_url: Option<String>,
    pub total_pages: i32,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct ReadingProgress {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub current_page: i32,
    pub progress_percent: f64,
    pub completed: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Page, percentage and completion derived from a reported page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPosition {
    pub current_page: i32,
    pub progress_percent: f64,
    pub completed: bool,
}

impl ProgressPosition {
    pub fn compute(page: i32, total_pages: i32) -> Self {
        let total_pages = total_pages.max(0);
        let current_page = page.clamp(0, total_pages);
        Self {
            current_page,
            progress_percent: crate::utils::percent::percentage(
                current_page as f64,
                total_pages as f64,
            ),
            completed: total_pages > 0 && current_page == total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_clamped() {
        let p = ProgressPosition::compute(500, 320);
        assert_eq!(p.current_page, 320);
        assert_eq!(p.progress_percent, 100.0);
        assert!(p.completed);

        let p = ProgressPosition::compute(-4, 320);
        assert_eq!(p.current_page, 0);
        assert_eq!(p.progress_percent, 0.0);
        assert!(!p.completed);
    }

    #[test]
    fn test_partial_progress() {
        let p = ProgressPosition::compute(80, 320);
        assert_eq!(p.progress_percent, 25.0);
        assert!(!p.completed);
    }
}
