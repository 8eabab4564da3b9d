//! Who may act on which class, student or row

use actix_web::Result as ActixResult;
use std::sync::Arc;

use super::{forbidden, internal, not_found};
use crate::models::ErrorCode;
use crate::models::academics::entities::{StudentProfile, StudentSummary};
use crate::models::academics::requests::AudienceScope;
use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// Teacher `user` holds a teaching allocation for the class and subject.
/// `section` None asks for any section of the grade. Admins always pass.
pub async fn ensure_teaches(
    storage: &Arc<dyn Storage>,
    user: &User,
    grade_level: GradeLevel,
    section: Option<&Section>,
    subject: Subject,
) -> ActixResult<()> {
    if user.is_admin() {
        return Ok(());
    }
    let assigned = storage
        .teacher_has_assignment(user.id, grade_level, section, subject)
        .await
        .map_err(internal("Failed to check teacher assignment"))?;
    if !assigned {
        let class = match section {
            Some(section) => format!("grade {grade_level}{section}"),
            None => format!("grade {grade_level}"),
        };
        return Err(forbidden(
            ErrorCode::TeacherNotAssigned,
            format!("You are not assigned to teach {subject} in {class}"),
        ));
    }
    Ok(())
}

/// Creator of a row or an admin
pub fn ensure_owner(user: &User, owner_id: i64, code: ErrorCode, what: &str) -> ActixResult<()> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(forbidden(code, format!("You can only modify your own {what}")))
    }
}

pub async fn student_profile(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> ActixResult<StudentProfile> {
    storage
        .get_student_profile(user_id)
        .await
        .map_err(internal("Failed to load student profile"))?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student profile not found"))
}

pub async fn student_summary(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> ActixResult<StudentSummary> {
    storage
        .get_student_summary(user_id)
        .await
        .map_err(internal("Failed to load student"))?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student not found"))
}

/// Class-targeted rows the viewer may list
pub async fn audience_scope(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> ActixResult<AudienceScope> {
    match user.role {
        UserRole::Admin => Ok(AudienceScope::All),
        UserRole::Teacher => Ok(AudienceScope::Teacher(user.id)),
        UserRole::Student => {
            let profile = student_profile(storage, user.id).await?;
            Ok(AudienceScope::Class {
                grade_level: profile.grade_level,
                section: profile.section,
            })
        }
        UserRole::Parent => Err(forbidden(
            ErrorCode::Forbidden,
            "Parents view class work through their children",
        )),
    }
}

/// Whether a row aimed at a class and owned by `owner_id` is visible.
/// Students need the row to target their class; teachers need to own it.
pub async fn can_view_class_row(
    storage: &Arc<dyn Storage>,
    user: &User,
    owner_id: i64,
    grade_level: GradeLevel,
    section: Option<&Section>,
) -> ActixResult<bool> {
    match user.role {
        UserRole::Admin => Ok(true),
        UserRole::Teacher => Ok(user.id == owner_id),
        UserRole::Student => {
            let profile = student_profile(storage, user.id).await?;
            Ok(profile.is_in(grade_level, section))
        }
        UserRole::Parent => Ok(false),
    }
}

/// Student themselves, an approved parent, any teacher or an admin
pub async fn ensure_can_view_student(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
) -> ActixResult<()> {
    let allowed = match user.role {
        UserRole::Admin | UserRole::Teacher => true,
        UserRole::Student => user.id == student_id,
        UserRole::Parent => storage
            .is_parent_of(user.id, student_id)
            .await
            .map_err(internal("Failed to check parent link"))?,
    };
    if allowed {
        Ok(())
    } else if user.role == UserRole::Parent {
        Err(forbidden(
            ErrorCode::LinkNotApproved,
            "No approved link to this student",
        ))
    } else {
        Err(forbidden(
            ErrorCode::Forbidden,
            "You cannot view another student's records",
        ))
    }
}

/// An attachment token must name an uploaded file
pub async fn ensure_file_exists(storage: &Arc<dyn Storage>, token: Option<&str>) -> ActixResult<()> {
    let Some(token) = token else {
        return Ok(());
    };
    let file = storage
        .get_file_by_token(token)
        .await
        .map_err(internal("Failed to load file"))?;
    if file.is_none() {
        return Err(not_found(
            ErrorCode::FileNotFound,
            "Attached file not found, upload it first",
        ));
    }
    Ok(())
}
