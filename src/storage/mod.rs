use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Accounts
    // user row plus role profile, in one transaction; students get a FAV ID
    async fn create_user_with_profile(
        &self,
        user: NewUser,
        profile: NewRoleProfile,
    ) -> Result<(User, Option<StudentProfile>)>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // email or FAV ID
    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // password in the update must already be hashed
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn get_account_profile(&self, user_id: i64, role: UserRole) -> Result<AccountProfile>;
    async fn count_users(&self) -> Result<u64>;

    /// Academics
    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse>;
    async fn get_student_profile(&self, user_id: i64) -> Result<Option<StudentProfile>>;
    async fn get_student_summary(&self, user_id: i64) -> Result<Option<StudentSummary>>;
    async fn get_student_by_fav_id(&self, fav_id: &FavId) -> Result<Option<StudentSummary>>;
    async fn update_student_placement(
        &self,
        user_id: i64,
        placement: UpdatePlacementRequest,
    ) -> Result<Option<StudentProfile>>;
    // active students of a grade, optionally one section
    async fn count_students_in_class(
        &self,
        grade_level: GradeLevel,
        section: Option<&Section>,
    ) -> Result<u64>;
    async fn get_teacher_profile(&self, user_id: i64) -> Result<Option<TeacherProfile>>;
    async fn create_teacher_assignment(
        &self,
        req: CreateTeacherAssignmentRequest,
    ) -> Result<TeacherAssignment>;
    async fn list_teacher_assignments(
        &self,
        params: TeacherAssignmentListParams,
    ) -> Result<Vec<TeacherAssignment>>;
    async fn delete_teacher_assignment(&self, id: i64) -> Result<bool>;
    // section None: any section of the grade
    async fn teacher_has_assignment(
        &self,
        teacher_id: i64,
        grade_level: GradeLevel,
        section: Option<&Section>,
        subject: Subject,
    ) -> Result<bool>;

    /// Parent-child links
    async fn create_link(
        &self,
        parent_id: i64,
        student_id: i64,
        relationship: Option<String>,
    ) -> Result<ParentChildLink>;
    // pending or approved link between the pair
    async fn find_active_link(
        &self,
        parent_id: i64,
        student_id: i64,
    ) -> Result<Option<ParentChildLink>>;
    async fn get_link(&self, id: i64) -> Result<Option<ParentChildLink>>;
    async fn list_links(&self, query: LinkListQuery) -> Result<LinkListResponse>;
    // only a pending link changes; None when the link is gone or already reviewed
    async fn review_link(
        &self,
        id: i64,
        reviewer_id: i64,
        status: LinkStatus,
    ) -> Result<Option<ParentChildLink>>;
    async fn delete_link(&self, id: i64) -> Result<bool>;
    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildSummary>>;
    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool>;

    /// Files
    async fn create_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    async fn get_file_by_token(&self, download_token: &str) -> Result<Option<File>>;

    /// Homework assignments
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// Submissions
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: SubmitAssignmentRequest,
        is_late: bool,
    ) -> Result<Submission>;
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_student_submissions_for(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
        page: u64,
        size: u64,
        status: Option<SubmissionStatus>,
    ) -> Result<SubmissionListResponse>;
    async fn list_my_submissions(
        &self,
        student_id: i64,
        page: u64,
        size: u64,
    ) -> Result<MySubmissionListResponse>;
    async fn grade_submission(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// Recorded marks
    async fn upsert_grade(&self, teacher_id: i64, req: RecordGradeRequest) -> Result<GradeRecord>;
    async fn get_grade(&self, id: i64) -> Result<Option<GradeRecord>>;
    async fn list_grades(
        &self,
        student_id: i64,
        params: GradeListParams,
    ) -> Result<Vec<GradeRecord>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// Quizzes
    async fn create_quiz(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>>;
    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>>;
    async fn set_quiz_published(&self, id: i64, published: bool) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, id: i64) -> Result<bool>;
    async fn list_quizzes(&self, query: QuizListQuery) -> Result<QuizListResponse>;
    async fn add_question(&self, quiz_id: i64, question: NewQuestion) -> Result<QuizQuestion>;
    async fn get_question(&self, id: i64) -> Result<Option<QuizQuestion>>;
    async fn update_question(
        &self,
        id: i64,
        question: NewQuestion,
    ) -> Result<Option<QuizQuestion>>;
    async fn delete_question(&self, id: i64) -> Result<bool>;
    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>>;

    /// Quiz attempts
    async fn start_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        max_score: i32,
    ) -> Result<QuizAttempt>;
    async fn get_attempt(&self, id: i64) -> Result<Option<QuizAttempt>>;
    async fn get_student_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>>;
    async fn save_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<QuizAnswer>;
    async fn list_answers(&self, attempt_id: i64) -> Result<Vec<QuizAnswer>>;
    // scores and closes the attempt atomically; Conflict when already submitted
    async fn submit_attempt(&self, attempt_id: i64) -> Result<QuizAttempt>;
    async fn list_attempts(&self, quiz_id: i64) -> Result<Vec<AttemptListItem>>;
    async fn list_student_attempts(&self, student_id: i64) -> Result<Vec<QuizAttempt>>;

    /// Library
    async fn create_book(&self, uploader_id: i64, req: CreateBookRequest) -> Result<Book>;
    async fn get_book(&self, id: i64) -> Result<Option<Book>>;
    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>>;
    async fn delete_book(&self, id: i64) -> Result<bool>;
    async fn list_books(&self, query: BookListQuery) -> Result<BookListResponse>;
    async fn upsert_progress(
        &self,
        book_id: i64,
        user_id: i64,
        position: ProgressPosition,
    ) -> Result<ReadingProgress>;
    async fn get_progress(&self, book_id: i64, user_id: i64) -> Result<Option<ReadingProgress>>;
    async fn list_progress(&self, user_id: i64) -> Result<Vec<ProgressItem>>;

    /// Messages
    async fn create_message(&self, sender_id: i64, req: SendMessageRequest) -> Result<Message>;
    async fn get_message(&self, id: i64) -> Result<Option<MessageView>>;
    async fn list_messages(&self, query: MessageListQuery) -> Result<MessageListResponse>;
    async fn mark_message_read(&self, id: i64) -> Result<bool>;
    async fn unread_count(&self, user_id: i64) -> Result<i64>;
    async fn delete_message(&self, id: i64) -> Result<bool>;

    /// News
    async fn create_news(&self, author_id: i64, req: CreateNewsRequest) -> Result<News>;
    async fn get_news(&self, id: i64) -> Result<Option<NewsItem>>;
    async fn update_news(&self, id: i64, update: UpdateNewsRequest) -> Result<Option<News>>;
    async fn delete_news(&self, id: i64) -> Result<bool>;
    async fn list_news(&self, query: NewsListQuery) -> Result<NewsListResponse>;

    /// Dashboards
    async fn admin_dashboard(&self) -> Result<AdminDashboard>;
    async fn teacher_dashboard(&self, teacher_id: i64) -> Result<TeacherDashboard>;
    async fn student_dashboard(&self, student: StudentSummary) -> Result<StudentDashboard>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
