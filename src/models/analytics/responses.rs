use crate::models::academics::entities::StudentSummary;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct RoleCounts {
    pub admin: i64,
    pub teacher: i64,
    pub student: i64,
    pub parent: i64,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct StatusCounts {
    pub pending: i64,
    pub active: i64,
    pub suspended: i64,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct AdminDashboard {
    pub users_by_role: RoleCounts,
    pub users_by_status: StatusCounts,
    pub pending_parent_links: i64,
    pub assignments: i64,
    pub submissions: i64,
    pub graded_submissions: i64,
    /// Students targeted summed over every assignment
    pub expected_submissions: i64,
    pub submission_rate: f64,
    pub quizzes: i64,
    pub published_quizzes: i64,
    pub submitted_attempts: i64,
    pub average_quiz_percentage: f64,
    pub books: i64,
    pub messages: i64,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct TeacherDashboard {
    pub teaching_assignments: i64,
    pub assignments: i64,
    pub submissions_received: i64,
    pub graded: i64,
    pub pending_grading: i64,
    pub expected_submissions: i64,
    pub submission_rate: f64,
    pub quizzes: i64,
    pub quiz_attempts: i64,
    pub average_quiz_percentage: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct StudentDashboard {
    pub student: StudentSummary,
    pub assignments_visible: i64,
    pub assignments_submitted: i64,
    pub assignments_graded: i64,
    pub overdue_unsubmitted: i64,
    pub average_assignment_percentage: f64,
    pub quiz_attempts: i64,
    pub average_quiz_percentage: f64,
    pub books_in_progress: i64,
    pub books_completed: i64,
    pub unread_messages: i64,
}
