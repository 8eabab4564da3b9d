//! Per-user reading position in a book

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reading_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub current_page: i32,
    pub progress_percent: f64,
    pub completed: bool,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_progress(self) -> crate::models::library::entities::ReadingProgress {
        crate::models::library::entities::ReadingProgress {
            id: self.id,
            book_id: self.book_id,
            user_id: self.user_id,
            current_page: self.current_page,
            progress_percent: self.progress_percent,
            completed: self.completed,
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
