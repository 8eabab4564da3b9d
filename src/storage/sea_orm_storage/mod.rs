//! SeaORM storage
//!
//! One storage layer over SQLite, PostgreSQL and MySQL.

mod academics;
mod analytics;
mod assignments;
mod files;
mod grades;
mod library;
mod messages;
mod news;
mod parents;
mod quizzes;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{DlmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM storage
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// Maps a database error, keeping unique violations as `Conflict`
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(DbErr) -> DlmsError {
    move |e| match DlmsError::from(e) {
        DlmsError::Conflict(detail) => DlmsError::conflict(format!("{context}: {detail}")),
        other => DlmsError::database_operation(format!("{context}: {}", other.message())),
    }
}

impl SeaOrmStorage {
    /// Connects using the global configuration and runs pending migrations
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// Connects to an explicit URL and runs pending migrations
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| DlmsError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite with WAL and tuned pragmas
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DlmsError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // every pooled connection to :memory: would see its own database
        let max_connections = if in_memory { 1 } else { pool_size.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| DlmsError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL, MySQL and MariaDB
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DlmsError::database_connection(format!("Cannot connect to database: {e}")))
    }

    /// Infers the backend from the URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DlmsError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }
}

/// Hides the password part of a connection URL
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

// Storage trait implementation
use crate::models::{
    PaginatedResponse,
    academics::{
        entities::{
            AccountProfile, NewRoleProfile, StudentProfile, StudentSummary, TeacherAssignment,
            TeacherProfile,
        },
        requests::{
            CreateTeacherAssignmentRequest, StudentListQuery, TeacherAssignmentListParams,
            UpdatePlacementRequest,
        },
        responses::StudentListResponse,
        taxonomy::{FavId, GradeLevel, Section, Subject},
    },
    analytics::responses::{AdminDashboard, StudentDashboard, TeacherDashboard},
    assignments::{
        entities::{Assignment, Submission, SubmissionStatus},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, SubmitAssignmentRequest,
            UpdateAssignmentRequest,
        },
        responses::{MySubmissionListResponse, SubmissionListResponse},
    },
    files::entities::File,
    grades::{
        entities::GradeRecord,
        requests::{GradeListParams, RecordGradeRequest},
    },
    library::{
        entities::{Book, ProgressPosition, ReadingProgress},
        requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
        responses::{BookListResponse, ProgressItem},
    },
    messages::{
        entities::{Message, MessageView},
        requests::{MessageListQuery, SendMessageRequest},
        responses::MessageListResponse,
    },
    news::{
        entities::News,
        requests::{CreateNewsRequest, NewsListQuery, UpdateNewsRequest},
        responses::{NewsItem, NewsListResponse},
    },
    parents::{
        entities::{LinkStatus, ParentChildLink},
        requests::LinkListQuery,
        responses::{ChildSummary, LinkListResponse},
    },
    quizzes::{
        entities::{Quiz, QuizAnswer, QuizAttempt, QuizQuestion},
        requests::{CreateQuizRequest, NewQuestion, QuizListQuery, UpdateQuizRequest},
        responses::{AttemptListItem, QuizListResponse},
    },
    users::{
        entities::{User, UserRole},
        requests::{NewUser, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // accounts
    async fn create_user_with_profile(
        &self,
        user: NewUser,
        profile: NewRoleProfile,
    ) -> Result<(User, Option<StudentProfile>)> {
        self.create_user_with_profile_impl(user, profile).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_identifier_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn get_account_profile(&self, user_id: i64, role: UserRole) -> Result<AccountProfile> {
        self.get_account_profile_impl(user_id, role).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_where(sea_orm::Condition::all()).await
    }

    // academics
    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        self.list_students_impl(query).await
    }

    async fn get_student_profile(&self, user_id: i64) -> Result<Option<StudentProfile>> {
        self.get_student_profile_impl(user_id).await
    }

    async fn get_student_summary(&self, user_id: i64) -> Result<Option<StudentSummary>> {
        self.get_student_summary_impl(user_id).await
    }

    async fn get_student_by_fav_id(&self, fav_id: &FavId) -> Result<Option<StudentSummary>> {
        self.get_student_by_fav_id_impl(fav_id).await
    }

    async fn update_student_placement(
        &self,
        user_id: i64,
        placement: UpdatePlacementRequest,
    ) -> Result<Option<StudentProfile>> {
        self.update_student_placement_impl(user_id, placement).await
    }

    async fn count_students_in_class(
        &self,
        grade_level: GradeLevel,
        section: Option<&Section>,
    ) -> Result<u64> {
        self.count_students_in_class_impl(grade_level, section)
            .await
    }

    async fn get_teacher_profile(&self, user_id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_impl(user_id).await
    }

    async fn create_teacher_assignment(
        &self,
        req: CreateTeacherAssignmentRequest,
    ) -> Result<TeacherAssignment> {
        self.create_teacher_assignment_impl(req).await
    }

    async fn list_teacher_assignments(
        &self,
        params: TeacherAssignmentListParams,
    ) -> Result<Vec<TeacherAssignment>> {
        self.list_teacher_assignments_impl(params).await
    }

    async fn delete_teacher_assignment(&self, id: i64) -> Result<bool> {
        self.delete_teacher_assignment_impl(id).await
    }

    async fn teacher_has_assignment(
        &self,
        teacher_id: i64,
        grade_level: GradeLevel,
        section: Option<&Section>,
        subject: Subject,
    ) -> Result<bool> {
        self.teacher_has_assignment_impl(teacher_id, grade_level, section, subject)
            .await
    }

    // parent-child links
    async fn create_link(
        &self,
        parent_id: i64,
        student_id: i64,
        relationship: Option<String>,
    ) -> Result<ParentChildLink> {
        self.create_link_impl(parent_id, student_id, relationship)
            .await
    }

    async fn find_active_link(
        &self,
        parent_id: i64,
        student_id: i64,
    ) -> Result<Option<ParentChildLink>> {
        self.find_active_link_impl(parent_id, student_id).await
    }

    async fn get_link(&self, id: i64) -> Result<Option<ParentChildLink>> {
        self.get_link_impl(id).await
    }

    async fn list_links(&self, query: LinkListQuery) -> Result<LinkListResponse> {
        self.list_links_impl(query).await
    }

    async fn review_link(
        &self,
        id: i64,
        reviewer_id: i64,
        status: LinkStatus,
    ) -> Result<Option<ParentChildLink>> {
        self.review_link_impl(id, reviewer_id, status).await
    }

    async fn delete_link(&self, id: i64) -> Result<bool> {
        self.delete_link_impl(id).await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildSummary>> {
        self.list_children_impl(parent_id).await
    }

    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.is_parent_of_impl(parent_id, student_id).await
    }

    // files
    async fn create_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_impl(
            download_token,
            original_name,
            stored_name,
            file_size,
            file_type,
            user_id,
        )
        .await
    }

    async fn get_file_by_token(&self, download_token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(download_token).await
    }

    // homework assignments
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, req).await
    }

    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(id).await
    }

    async fn list_assignments(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // submissions
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: SubmitAssignmentRequest,
        is_late: bool,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, req, is_late)
            .await
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_impl(id).await
    }

    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_student_submission_impl(assignment_id, student_id)
            .await
    }

    async fn list_student_submissions_for(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_for_impl(student_id, assignment_ids)
            .await
    }

    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
        page: u64,
        size: u64,
        status: Option<SubmissionStatus>,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_for_assignment_impl(assignment_id, page, size, status)
            .await
    }

    async fn list_my_submissions(
        &self,
        student_id: i64,
        page: u64,
        size: u64,
    ) -> Result<MySubmissionListResponse> {
        self.list_my_submissions_impl(student_id, page, size).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grader_id, score, feedback)
            .await
    }

    // recorded marks
    async fn upsert_grade(&self, teacher_id: i64, req: RecordGradeRequest) -> Result<GradeRecord> {
        self.upsert_grade_impl(teacher_id, req).await
    }

    async fn get_grade(&self, id: i64) -> Result<Option<GradeRecord>> {
        self.get_grade_impl(id).await
    }

    async fn list_grades(
        &self,
        student_id: i64,
        params: GradeListParams,
    ) -> Result<Vec<GradeRecord>> {
        self.list_grades_impl(student_id, params).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // quizzes
    async fn create_quiz(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(teacher_id, req).await
    }

    async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_impl(id).await
    }

    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        self.update_quiz_impl(id, update).await
    }

    async fn set_quiz_published(&self, id: i64, published: bool) -> Result<Option<Quiz>> {
        self.set_quiz_published_impl(id, published).await
    }

    async fn delete_quiz(&self, id: i64) -> Result<bool> {
        self.delete_quiz_impl(id).await
    }

    async fn list_quizzes(&self, query: QuizListQuery) -> Result<QuizListResponse> {
        self.list_quizzes_impl(query).await
    }

    async fn add_question(&self, quiz_id: i64, question: NewQuestion) -> Result<QuizQuestion> {
        self.add_question_impl(quiz_id, question).await
    }

    async fn get_question(&self, id: i64) -> Result<Option<QuizQuestion>> {
        self.get_question_impl(id).await
    }

    async fn update_question(
        &self,
        id: i64,
        question: NewQuestion,
    ) -> Result<Option<QuizQuestion>> {
        self.update_question_impl(id, question).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>> {
        self.list_questions_impl(quiz_id).await
    }

    // quiz attempts
    async fn start_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        max_score: i32,
    ) -> Result<QuizAttempt> {
        self.start_attempt_impl(quiz_id, student_id, max_score)
            .await
    }

    async fn get_attempt(&self, id: i64) -> Result<Option<QuizAttempt>> {
        self.get_attempt_impl(id).await
    }

    async fn get_student_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        self.get_student_attempt_impl(quiz_id, student_id).await
    }

    async fn save_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<QuizAnswer> {
        self.save_answer_impl(attempt_id, question_id, answer).await
    }

    async fn list_answers(&self, attempt_id: i64) -> Result<Vec<QuizAnswer>> {
        self.list_answers_impl(attempt_id).await
    }

    async fn submit_attempt(&self, attempt_id: i64) -> Result<QuizAttempt> {
        self.submit_attempt_impl(attempt_id).await
    }

    async fn list_attempts(&self, quiz_id: i64) -> Result<Vec<AttemptListItem>> {
        self.list_attempts_impl(quiz_id).await
    }

    async fn list_student_attempts(&self, student_id: i64) -> Result<Vec<QuizAttempt>> {
        self.list_student_attempts_impl(student_id).await
    }

    // library
    async fn create_book(&self, uploader_id: i64, req: CreateBookRequest) -> Result<Book> {
        self.create_book_impl(uploader_id, req).await
    }

    async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        self.get_book_impl(id).await
    }

    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        self.update_book_impl(id, update).await
    }

    async fn delete_book(&self, id: i64) -> Result<bool> {
        self.delete_book_impl(id).await
    }

    async fn list_books(&self, query: BookListQuery) -> Result<BookListResponse> {
        self.list_books_impl(query).await
    }

    async fn upsert_progress(
        &self,
        book_id: i64,
        user_id: i64,
        position: ProgressPosition,
    ) -> Result<ReadingProgress> {
        self.upsert_progress_impl(book_id, user_id, position).await
    }

    async fn get_progress(&self, book_id: i64, user_id: i64) -> Result<Option<ReadingProgress>> {
        self.get_progress_impl(book_id, user_id).await
    }

    async fn list_progress(&self, user_id: i64) -> Result<Vec<ProgressItem>> {
        self.list_progress_impl(user_id).await
    }

    // messages
    async fn create_message(&self, sender_id: i64, req: SendMessageRequest) -> Result<Message> {
        self.create_message_impl(sender_id, req).await
    }

    async fn get_message(&self, id: i64) -> Result<Option<MessageView>> {
        self.get_message_impl(id).await
    }

    async fn list_messages(&self, query: MessageListQuery) -> Result<MessageListResponse> {
        self.list_messages_impl(query).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<bool> {
        self.mark_message_read_impl(id).await
    }

    async fn unread_count(&self, user_id: i64) -> Result<i64> {
        self.unread_count_impl(user_id).await
    }

    async fn delete_message(&self, id: i64) -> Result<bool> {
        self.delete_message_impl(id).await
    }

    // news
    async fn create_news(&self, author_id: i64, req: CreateNewsRequest) -> Result<News> {
        self.create_news_impl(author_id, req).await
    }

    async fn get_news(&self, id: i64) -> Result<Option<NewsItem>> {
        self.get_news_impl(id).await
    }

    async fn update_news(&self, id: i64, update: UpdateNewsRequest) -> Result<Option<News>> {
        self.update_news_impl(id, update).await
    }

    async fn delete_news(&self, id: i64) -> Result<bool> {
        self.delete_news_impl(id).await
    }

    async fn list_news(&self, query: NewsListQuery) -> Result<NewsListResponse> {
        self.list_news_impl(query).await
    }

    // dashboards
    async fn admin_dashboard(&self) -> Result<AdminDashboard> {
        self.admin_dashboard_impl().await
    }

    async fn teacher_dashboard(&self, teacher_id: i64) -> Result<TeacherDashboard> {
        self.teacher_dashboard_impl(teacher_id).await
    }

    async fn student_dashboard(&self, student: StudentSummary) -> Result<StudentDashboard> {
        self.student_dashboard_impl(student).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("dlms.db").unwrap(),
            "sqlite://dlms.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@db/dlms").unwrap(),
            "postgres://u:p@db/dlms"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://dlms:secret@db:5432/dlms"),
            "postgres://dlms:***@db:5432/dlms"
        );
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_db_error_keeps_plain_errors() {
        let err = db_error("Load quiz")(DbErr::Custom("boom".into()));
        assert!(!err.is_conflict());
        assert!(err.message().contains("Load quiz"));
    }
}
