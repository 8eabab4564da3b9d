//! Dashboard aggregates

use std::collections::HashSet;

use super::assignments::scoped;
use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{
    assignments, parent_child_links, quiz_attempts, quizzes, reading_progress, submissions,
    teacher_assignments, users,
};
use crate::errors::Result;
use crate::models::{
    academics::{
        entities::StudentSummary,
        requests::AudienceScope,
        taxonomy::{GradeLevel, Section},
    },
    analytics::responses::{
        AdminDashboard, RoleCounts, StatusCounts, StudentDashboard, TeacherDashboard,
    },
    assignments::entities::SubmissionStatus,
    parents::entities::LinkStatus,
    quizzes::entities::AttemptStatus,
    users::entities::{UserRole, UserStatus},
};
use crate::utils::percent::{mean, percentage, ratio};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// Students an assignment set expects a submission from, summed per target class
    async fn expected_submissions(&self, teacher_id: Option<i64>) -> Result<u64> {
        let mut select = Assignments::find()
            .select_only()
            .column(assignments::Column::GradeLevel)
            .column(assignments::Column::Section)
            .column_as(assignments::Column::Id.count(), "assignment_count")
            .group_by(assignments::Column::GradeLevel)
            .group_by(assignments::Column::Section);

        if let Some(teacher_id) = teacher_id {
            select = select.filter(assignments::Column::TeacherId.eq(teacher_id));
        }

        let groups = select
            .into_tuple::<(i32, Option<String>, i64)>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to group assignments"))?;

        let mut expected = 0u64;
        for (grade_level, section, assignment_count) in groups {
            let Ok(grade_level) = GradeLevel::try_from(grade_level) else {
                continue;
            };
            let section = section.and_then(|s| Section::try_from(s).ok());
            let students = self
                .count_students_in_class_impl(grade_level, section.as_ref())
                .await?;
            expected += students * assignment_count.max(0) as u64;
        }

        Ok(expected)
    }

    /// Mean percentage over submitted attempts matching the filter
    async fn average_attempt_percentage(&self, condition: Condition) -> Result<(u64, f64)> {
        let rows = QuizAttempts::find()
            .inner_join(Quizzes)
            .filter(quiz_attempts::Column::Status.eq(AttemptStatus::SUBMITTED))
            .filter(condition)
            .select_only()
            .column(quiz_attempts::Column::Score)
            .column(quiz_attempts::Column::MaxScore)
            .into_tuple::<(Option<i32>, i32)>()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load attempt scores"))?;

        let average = mean(
            rows.iter()
                .map(|(score, max)| percentage(score.unwrap_or(0) as f64, *max as f64)),
        );

        Ok((rows.len() as u64, average))
    }

    pub async fn admin_dashboard_impl(&self) -> Result<AdminDashboard> {
        let by_role = |role: UserRole| Condition::all().add(users::Column::Role.eq(role.to_string()));
        let by_status =
            |status: UserStatus| Condition::all().add(users::Column::Status.eq(status.to_string()));

        let users_by_role = RoleCounts {
            admin: self.count_users_where(by_role(UserRole::Admin)).await? as i64,
            teacher: self.count_users_where(by_role(UserRole::Teacher)).await? as i64,
            student: self.count_users_where(by_role(UserRole::Student)).await? as i64,
            parent: self.count_users_where(by_role(UserRole::Parent)).await? as i64,
        };
        let users_by_status = StatusCounts {
            pending: self.count_users_where(by_status(UserStatus::Pending)).await? as i64,
            active: self.count_users_where(by_status(UserStatus::Active)).await? as i64,
            suspended: self.count_users_where(by_status(UserStatus::Suspended)).await? as i64,
        };

        let pending_parent_links = ParentChildLinks::find()
            .filter(parent_child_links::Column::Status.eq(LinkStatus::Pending.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count parent links"))?;

        let assignment_count = Assignments::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count assignments"))?;
        let submission_count = Submissions::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count submissions"))?;
        let graded_submissions = Submissions::find()
            .filter(submissions::Column::Status.eq(SubmissionStatus::Graded.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count graded submissions"))?;
        let expected = self.expected_submissions(None).await?;

        let quiz_count = Quizzes::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count quizzes"))?;
        let published_quizzes = Quizzes::find()
            .filter(quizzes::Column::IsPublished.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count quizzes"))?;
        let (submitted_attempts, average_quiz_percentage) =
            self.average_attempt_percentage(Condition::all()).await?;

        let books = Books::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count books"))?;
        let message_count = Messages::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count messages"))?;

        Ok(AdminDashboard {
            users_by_role,
            users_by_status,
            pending_parent_links: pending_parent_links as i64,
            assignments: assignment_count as i64,
            submissions: submission_count as i64,
            graded_submissions: graded_submissions as i64,
            expected_submissions: expected as i64,
            submission_rate: ratio(submission_count, expected),
            quizzes: quiz_count as i64,
            published_quizzes: published_quizzes as i64,
            submitted_attempts: submitted_attempts as i64,
            average_quiz_percentage,
            books: books as i64,
            messages: message_count as i64,
        })
    }

    pub async fn teacher_dashboard_impl(&self, teacher_id: i64) -> Result<TeacherDashboard> {
        let teaching_assignments = TeacherAssignments::find()
            .filter(teacher_assignments::Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count teaching assignments"))?;

        let assignment_count = Assignments::find()
            .filter(assignments::Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count assignments"))?;

        let received = || {
            Submissions::find()
                .inner_join(Assignments)
                .filter(assignments::Column::TeacherId.eq(teacher_id))
        };
        let submissions_received = received()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count submissions"))?;
        let graded = received()
            .filter(submissions::Column::Status.eq(SubmissionStatus::Graded.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count graded submissions"))?;
        let expected = self.expected_submissions(Some(teacher_id)).await?;

        let quiz_count = Quizzes::find()
            .filter(quizzes::Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count quizzes"))?;
        let (quiz_attempts, average_quiz_percentage) = self
            .average_attempt_percentage(
                Condition::all().add(quizzes::Column::TeacherId.eq(teacher_id)),
            )
            .await?;

        Ok(TeacherDashboard {
            teaching_assignments: teaching_assignments as i64,
            assignments: assignment_count as i64,
            submissions_received: submissions_received as i64,
            graded: graded as i64,
            pending_grading: submissions_received.saturating_sub(graded) as i64,
            expected_submissions: expected as i64,
            submission_rate: ratio(submissions_received, expected),
            quizzes: quiz_count as i64,
            quiz_attempts: quiz_attempts as i64,
            average_quiz_percentage,
        })
    }

    pub async fn student_dashboard_impl(&self, student: StudentSummary) -> Result<StudentDashboard> {
        let student_id = student.user_id;
        let scope = AudienceScope::Class {
            grade_level: student.grade_level,
            section: student.section.clone(),
        };
        let visible = || {
            scoped(
                Assignments::find(),
                &scope,
                assignments::Column::TeacherId,
                assignments::Column::GradeLevel,
                assignments::Column::Section,
            )
        };

        let assignments_visible = visible()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count assignments"))?;

        let now = chrono::Utc::now().timestamp();
        let overdue_ids: Vec<i64> = visible()
            .filter(assignments::Column::DueDate.lt(now))
            .select_only()
            .column(assignments::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list overdue assignments"))?;

        let submitted = Submissions::find()
            .filter(submissions::Column::StudentId.eq(student_id))
            .find_also_related(Assignments)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list submissions"))?;

        let submitted_ids: HashSet<i64> = submitted.iter().map(|(s, _)| s.assignment_id).collect();
        let overdue_unsubmitted = overdue_ids
            .iter()
            .filter(|id| !submitted_ids.contains(id))
            .count();

        let graded_percentages: Vec<f64> = submitted
            .iter()
            .filter(|(s, _)| s.status == SubmissionStatus::Graded.to_string())
            .filter_map(|(s, a)| {
                let assignment = a.as_ref()?;
                Some(percentage(s.score?, assignment.max_score))
            })
            .collect();

        let (quiz_attempts, average_quiz_percentage) = self
            .average_attempt_percentage(
                Condition::all().add(quiz_attempts::Column::StudentId.eq(student_id)),
            )
            .await?;

        let shelf =
            || ReadingProgresses::find().filter(reading_progress::Column::UserId.eq(student_id));
        let books_in_progress = shelf()
            .filter(reading_progress::Column::Completed.eq(false))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count reading progress"))?;
        let books_completed = shelf()
            .filter(reading_progress::Column::Completed.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count reading progress"))?;

        let unread_messages = self.unread_count_impl(student_id).await?;

        Ok(StudentDashboard {
            student,
            assignments_visible: assignments_visible as i64,
            assignments_submitted: submitted.len() as i64,
            assignments_graded: graded_percentages.len() as i64,
            overdue_unsubmitted: overdue_unsubmitted as i64,
            average_assignment_percentage: mean(graded_percentages),
            quiz_attempts: quiz_attempts as i64,
            average_quiz_percentage,
            books_in_progress: books_in_progress as i64,
            books_completed: books_completed as i64,
            unread_messages,
        })
    }
}
