//! Quizzes

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
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
    pub time_limit_minutes: Option<i32>,
    pub available_from: Option<i64>,
    pub available_until: Option<i64>,
    pub is_published: bool,
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
    #[sea_orm(has_many = "super::quiz_questions::Entity")]
    Questions,
}

impl Related<super::quiz_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::academics::taxonomy::{GradeLevel, Section, Subject};
        use crate::models::quizzes::entities::Quiz;

        Quiz {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            description: self.description,
            subject: self.subject.parse().unwrap_or(Subject::English),
            grade_level: GradeLevel::try_from(self.grade_level).unwrap_or_default(),
            section: self.section.and_then(|s| Section::try_from(s).ok()),
            time_limit_minutes: self.time_limit_minutes,
            available_from: super::to_datetime_opt(self.available_from),
            available_until: super::to_datetime_opt(self.available_until),
            is_published: self.is_published,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
