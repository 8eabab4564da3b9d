//! SeaORM entity definitions
//!
//! Database-facing rows, kept apart from the API models. Storage works on these
//! and converts them into `crate::models` types through the `into_*` helpers.

pub mod prelude;

pub mod assignments;
pub mod books;
pub mod files;
pub mod grades;
pub mod messages;
pub mod news;
pub mod parent_child_links;
pub mod parents;
pub mod quiz_answers;
pub mod quiz_attempts;
pub mod quiz_questions;
pub mod quizzes;
pub mod reading_progress;
pub mod students;
pub mod submissions;
pub mod teacher_assignments;
pub mod teachers;
pub mod users;

use chrono::{DateTime, Utc};

/// Stored Unix seconds to UTC time
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_datetime_opt(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
}
