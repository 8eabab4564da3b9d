//! Student profiles

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub fav_id: String,
    pub grade_level: i32,
    pub section: String,
    pub stream: Option<String>,
    pub enrolled_at: i64,
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

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::academics::entities::StudentProfile {
        use crate::models::academics::entities::StudentProfile;
        use crate::models::academics::taxonomy::{FavId, GradeLevel, Section};

        StudentProfile {
            user_id: self.user_id,
            fav_id: FavId::from_stored(self.fav_id),
            grade_level: GradeLevel::try_from(self.grade_level).unwrap_or_default(),
            section: Section::try_from(self.section).unwrap_or_default(),
            stream: self.stream.and_then(|s| s.parse().ok()),
            enrolled_at: super::to_datetime(self.enrolled_at),
        }
    }

    /// Joins the profile with its user row
    pub fn into_summary(
        self,
        user: &super::users::Model,
    ) -> crate::models::academics::entities::StudentSummary {
        use crate::models::academics::entities::StudentSummary;

        let profile = self.into_profile();
        StudentSummary {
            user_id: profile.user_id,
            fav_id: profile.fav_id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            grade_level: profile.grade_level,
            section: profile.section,
            stream: profile.stream,
        }
    }
}
