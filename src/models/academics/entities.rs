use super::taxonomy::{FavId, GradeLevel, Section, Stream, Subject};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct StudentProfile {
    pub user_id: i64,
    pub fav_id: FavId,
    pub grade_level: GradeLevel,
    pub section: Section,
    pub stream: Option<Stream>,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

impl StudentProfile {
    /// Whether a class with an optional section targets this student
    pub fn is_in(&self, grade_level: GradeLevel, section: Option<&Section>) -> bool {
        self.grade_level == grade_level && section.is_none_or(|s| *s == self.section)
    }
}

// Student row joined with the owning user
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct StudentSummary {
    pub user_id: i64,
    pub fav_id: FavId,
    pub full_name: String,
    pub email: String,
    pub grade_level: GradeLevel,
    pub section: Section,
    pub stream: Option<Stream>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct TeacherProfile {
    pub user_id: i64,
    pub subject: Subject,
    pub qualification: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct ParentProfile {
    pub user_id: i64,
    pub occupation: Option<String>,
    pub address: Option<String>,
}

/// A (teacher, grade, section, subject) teaching allocation
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct TeacherAssignment {
    pub id: i64,
    pub teacher_id: i64,
    pub grade_level: GradeLevel,
    pub section: Section,
    pub subject: Subject,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Role-specific profile written together with a new user
#[derive(Debug, Clone)]
pub enum NewRoleProfile {
    Admin,
    Student {
        grade_level: GradeLevel,
        section: Section,
        stream: Option<Stream>,
    },
    Teacher {
        subject: Subject,
        qualification: Option<String>,
    },
    Parent {
        occupation: Option<String>,
        address: Option<String>,
    },
}

/// Role profile attached to an account view
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct AccountProfile {
    pub student: Option<StudentProfile>,
    pub teacher: Option<TeacherProfile>,
    pub parent: Option<ParentProfile>,
}
