use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub grade_level: GradeLevel,
    /// None targets every section of the grade
    pub section: Option<Section>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub max_score: f64,
    pub allow_late: bool,
    pub attachment_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_past_due(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.due_date.is_some_and(|due| now > due)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub file_token: Option<String>,
    pub status: SubmissionStatus,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub is_late: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
}

/// Where a student stands on one assignment
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum StudentAssignmentStatus {
    Pending,
    Overdue,
    Submitted,
    Graded,
}

impl StudentAssignmentStatus {
    pub fn resolve(
        assignment: &Assignment,
        submission: Option<&Submission>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        match submission.map(|s| s.status) {
            Some(SubmissionStatus::Graded) => StudentAssignmentStatus::Graded,
            Some(SubmissionStatus::Submitted) => StudentAssignmentStatus::Submitted,
            None if assignment.is_past_due(now) => StudentAssignmentStatus::Overdue,
            None => StudentAssignmentStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment(due_in: Option<Duration>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            teacher_id: 2,
            title: "Kinematics worksheet".into(),
            description: None,
            subject: Subject::Physics,
            grade_level: GradeLevel::try_from(10).unwrap(),
            section: None,
            due_date: due_in.map(|d| now + d),
            max_score: 20.0,
            allow_late: false,
            attachment_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_past_due() {
        let now = Utc::now();
        assert!(!assignment(None).is_past_due(now));
        assert!(!assignment(Some(Duration::hours(1))).is_past_due(now));
        assert!(assignment(Some(Duration::hours(-1))).is_past_due(now));
    }

    #[test]
    fn test_student_status_without_submission() {
        let now = Utc::now();
        assert_eq!(
            StudentAssignmentStatus::resolve(&assignment(Some(Duration::days(1))), None, now),
            StudentAssignmentStatus::Pending
        );
        assert_eq!(
            StudentAssignmentStatus::resolve(&assignment(Some(Duration::days(-1))), None, now),
            StudentAssignmentStatus::Overdue
        );
    }
}
