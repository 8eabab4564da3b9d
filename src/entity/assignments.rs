//! Homework assignments

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject: String,
    pub grade_level: i32,
    pub section: Option<String>,
    pub due_date: Option<i64>,
    pub max_score: f64,
    pub allow_late: bool,
    pub attachment_token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
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
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
        use crate::models::assignments::entities::Assignment;

        Assignment {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            description: self.description,
            subject: self.subject.parse().unwrap_or(Subject::English),
            grade_level: GradeLevel::try_from(self.grade_level).unwrap_or_default(),
            section: self.section.and_then(|s| Section::try_from(s).ok()),
            due_date: super::to_datetime_opt(self.due_date),
            max_score: self.max_score,
            allow_late: self.allow_late,
            attachment_token: self.attachment_token,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
