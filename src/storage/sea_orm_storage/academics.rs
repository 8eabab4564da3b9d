//! Student placement, teacher profiles and teaching allocations

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{students, teacher_assignments, users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    academics::{
        entities::{StudentProfile, StudentSummary, TeacherAssignment, TeacherProfile},
        requests::{
            CreateTeacherAssignmentRequest, StudentListQuery, TeacherAssignmentListParams,
            UpdatePlacementRequest,
        },
        responses::StudentListResponse,
        taxonomy::{FavId, GradeLevel, Section, Subject},
    },
    users::entities::UserStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        let mut select = Students::find().find_also_related(Users);

        if let Some(grade_level) = query.grade_level {
            select = select.filter(students::Column::GradeLevel.eq(grade_level.value()));
        }
        if let Some(ref section) = query.section {
            select = select.filter(students::Column::Section.eq(section.as_str()));
        }
        if let Some(stream) = query.stream {
            select = select.filter(students::Column::Stream.eq(stream.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::FullName.contains(&escaped))
                    .add(users::Column::Email.contains(&escaped))
                    .add(students::Column::FavId.contains(escaped.to_uppercase())),
            );
        }

        let paginator = select
            .order_by_asc(students::Column::GradeLevel)
            .order_by_asc(students::Column::Section)
            .order_by_asc(students::Column::FavId)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count students"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list students"))?;

        let items = rows
            .into_iter()
            .filter_map(|(student, user)| user.map(|user| student.into_summary(&user)))
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn get_student_profile_impl(&self, user_id: i64) -> Result<Option<StudentProfile>> {
        let result = Students::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn get_student_summary_impl(&self, user_id: i64) -> Result<Option<StudentSummary>> {
        let result = Students::find_by_id(user_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?;

        Ok(result.and_then(|(student, user)| user.map(|user| student.into_summary(&user))))
    }

    pub async fn get_student_by_fav_id_impl(
        &self,
        fav_id: &FavId,
    ) -> Result<Option<StudentSummary>> {
        let result = Students::find()
            .filter(students::Column::FavId.eq(fav_id.as_str()))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?;

        Ok(result.and_then(|(student, user)| user.map(|user| student.into_summary(&user))))
    }

    pub async fn update_student_placement_impl(
        &self,
        user_id: i64,
        placement: UpdatePlacementRequest,
    ) -> Result<Option<StudentProfile>> {
        let Some(existing) = Students::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?
        else {
            return Ok(None);
        };

        let mut model: StudentActiveModel = existing.into();
        model.grade_level = Set(placement.grade_level.value());
        model.section = Set(placement.section.to_string());
        model.stream = Set(placement.stream.map(|s| s.to_string()));

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update placement"))?;

        Ok(Some(updated.into_profile()))
    }

    pub async fn count_students_in_class_impl(
        &self,
        grade_level: GradeLevel,
        section: Option<&Section>,
    ) -> Result<u64> {
        let mut select = Students::find()
            .inner_join(Users)
            .filter(users::Column::Status.eq(UserStatus::Active.to_string()))
            .filter(students::Column::GradeLevel.eq(grade_level.value()));

        if let Some(section) = section {
            select = select.filter(students::Column::Section.eq(section.as_str()));
        }

        select
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count students"))
    }

    pub async fn get_teacher_profile_impl(&self, user_id: i64) -> Result<Option<TeacherProfile>> {
        let result = Teachers::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load teacher"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn create_teacher_assignment_impl(
        &self,
        req: CreateTeacherAssignmentRequest,
    ) -> Result<TeacherAssignment> {
        let model = TeacherAssignmentActiveModel {
            teacher_id: Set(req.teacher_id),
            grade_level: Set(req.grade_level.value()),
            section: Set(req.section.to_string()),
            subject: Set(req.subject.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create teacher assignment"))?;

        Ok(result.into_teacher_assignment())
    }

    pub async fn list_teacher_assignments_impl(
        &self,
        params: TeacherAssignmentListParams,
    ) -> Result<Vec<TeacherAssignment>> {
        let mut select = TeacherAssignments::find();

        if let Some(teacher_id) = params.teacher_id {
            select = select.filter(teacher_assignments::Column::TeacherId.eq(teacher_id));
        }
        if let Some(grade_level) = params.grade_level {
            select = select.filter(teacher_assignments::Column::GradeLevel.eq(grade_level.value()));
        }
        if let Some(ref section) = params.section {
            select = select.filter(teacher_assignments::Column::Section.eq(section.as_str()));
        }
        if let Some(subject) = params.subject {
            select = select.filter(teacher_assignments::Column::Subject.eq(subject.to_string()));
        }

        let rows = select
            .order_by_asc(teacher_assignments::Column::GradeLevel)
            .order_by_asc(teacher_assignments::Column::Section)
            .order_by_asc(teacher_assignments::Column::Subject)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list teacher assignments"))?;

        Ok(rows
            .into_iter()
            .map(|m| m.into_teacher_assignment())
            .collect())
    }

    pub async fn delete_teacher_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = TeacherAssignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete teacher assignment"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn teacher_has_assignment_impl(
        &self,
        teacher_id: i64,
        grade_level: GradeLevel,
        section: Option<&Section>,
        subject: Subject,
    ) -> Result<bool> {
        let mut select = TeacherAssignments::find()
            .filter(teacher_assignments::Column::TeacherId.eq(teacher_id))
            .filter(teacher_assignments::Column::GradeLevel.eq(grade_level.value()))
            .filter(teacher_assignments::Column::Subject.eq(subject.to_string()));

        if let Some(section) = section {
            select = select.filter(teacher_assignments::Column::Section.eq(section.as_str()));
        }

        let found = select
            .select_only()
            .column(teacher_assignments::Column::Id)
            .into_tuple::<i64>()
            .one(&self.db)
            .await
            .map_err(db_error("Failed to check teacher assignment"))?;

        Ok(found.is_some())
    }
}
