//! API data models
//!
//! Business entities, request payloads and response shapes. TypeScript
//! bindings for the SPA are generated from these types by `ts-rs`.

pub mod academics;
pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod files;
pub mod grades;
pub mod library;
pub mod messages;
pub mod news;
pub mod parents;
pub mod quizzes;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// Process start time
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Business error codes carried in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // General
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // Authentication
    AuthFailed = 2000,
    RegisterFailed = 2001,
    EmailNotVerified = 2002,
    AccountSuspended = 2003,
    OtpInvalid = 2004,
    OtpExpired = 2005,
    OtpCooldown = 2006,
    MailDeliveryFailed = 2007,

    // Users
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserEmailAlreadyExists = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CanNotDeleteCurrentUser = 3008,

    // Academics
    StudentNotFound = 4000,
    InvalidPlacement = 4001,
    TeacherAssignmentNotFound = 4002,
    TeacherAssignmentExists = 4003,
    TeacherNotAssigned = 4004,

    // Assignments & submissions
    AssignmentNotFound = 5000,
    AssignmentInvalid = 5001,
    SubmissionNotFound = 5100,
    SubmissionAlreadyExists = 5101,
    SubmissionDeadlinePassed = 5102,
    SubmissionInvalid = 5103,
    ScoreOutOfRange = 5104,

    // Grades
    GradeNotFound = 5200,

    // Quizzes
    QuizNotFound = 6000,
    QuizInvalid = 6001,
    QuizNotAvailable = 6002,
    QuizAlreadyPublished = 6003,
    QuestionNotFound = 6004,
    AttemptNotFound = 6100,
    AttemptAlreadySubmitted = 6101,
    AttemptTimeExpired = 6102,

    // Library
    BookNotFound = 7000,

    // Messages & news
    MessageNotFound = 8000,
    MessageRecipientInvalid = 8001,
    NewsNotFound = 8100,

    // Parents
    LinkNotFound = 9000,
    LinkAlreadyExists = 9001,
    LinkNotPending = 9002,
    LinkNotApproved = 9003,

    // Files
    FileNotFound = 9500,
    FileUploadFailed = 9501,
    FileTypeNotAllowed = 9502,
    FileSizeExceeded = 9503,
    MultifileUploadNotAllowed = 9504,
}
