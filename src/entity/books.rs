//! Digital library books

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub author: String,
    pub subject: Option<String>,
    pub grade_level: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_token: Option<String>,
    pub cover_url: Option<String>,
    pub total_pages: i32,
    pub uploaded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reading_progress::Entity")]
    ReadingProgress,
}

impl Related<super::reading_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_book(self) -> crate::models::library::entities::Book {
        use crate::models::academics::taxonomy::GradeLevel;
        use crate::models::library::entities::Book;

        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            subject: self.subject.and_then(|s| s.parse().ok()),
            grade_level: self.grade_level.and_then(|g| GradeLevel::try_from(g).ok()),
            description: self.description,
            file_token: self.file_token,
            cover_url: self.cover_url,
            total_pages: self.total_pages,
            uploaded_by: self.uploaded_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
