//! Teaching allocations

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub grade_level: i32,
    pub section: String,
    pub subject: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_assignment(self) -> crate::models::academics::entities::TeacherAssignment {
        use crate::models::academics::entities::TeacherAssignment;
        use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};

        TeacherAssignment {
            id: self.id,
            teacher_id: self.teacher_id,
            grade_level: GradeLevel::try_from(self.grade_level).unwrap_or_default(),
            section: Section::try_from(self.section).unwrap_or_default(),
            subject: self.subject.parse().unwrap_or(Subject::English),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
