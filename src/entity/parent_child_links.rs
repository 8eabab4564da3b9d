//! Parent-child links

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_child_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub student_id: i64,
    pub relationship: Option<String>,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ParentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::UserId",
        on_delete = "Cascade"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_link(self) -> crate::models::parents::entities::ParentChildLink {
        use crate::models::parents::entities::{LinkStatus, ParentChildLink};

        ParentChildLink {
            id: self.id,
            parent_id: self.parent_id,
            student_id: self.student_id,
            relationship: self.relationship,
            status: self.status.parse().unwrap_or(LinkStatus::Pending),
            reviewed_by: self.reviewed_by,
            reviewed_at: super::to_datetime_opt(self.reviewed_at),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
