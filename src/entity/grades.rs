//! Recorded term marks

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub term: i32,
    pub academic_year: i32,
    pub score: f64,
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::GradeRecord {
        use crate::models::academics::taxonomy::Subject;
        use crate::models::grades::entities::GradeRecord;

        GradeRecord {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            subject: self.subject.parse().unwrap_or(Subject::English),
            term: self.term,
            academic_year: self.academic_year,
            score: self.score,
            max_score: self.max_score,
            remarks: self.remarks,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
