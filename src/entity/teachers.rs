//! Teacher profiles

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub subject: String,
    pub qualification: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::academics::entities::TeacherProfile {
        use crate::models::academics::entities::TeacherProfile;
        use crate::models::academics::taxonomy::Subject;

        TeacherProfile {
            user_id: self.user_id,
            subject: self.subject.parse().unwrap_or(Subject::English),
            qualification: self.qualification,
        }
    }
}
