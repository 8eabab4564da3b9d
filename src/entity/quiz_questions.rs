//! Quiz questions; options are stored as a JSON array

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_type: String,
    #[sea_orm(column_type = "Text")]
    pub options: String,
    #[sea_orm(column_type = "Text")]
    pub correct_answer: String,
    pub points: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id",
        on_delete = "Cascade"
    )]
    Quiz,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::quizzes::entities::QuizQuestion {
        use crate::models::quizzes::entities::{QuestionType, QuizQuestion};

        QuizQuestion {
            id: self.id,
            quiz_id: self.quiz_id,
            question_text: self.question_text,
            question_type: self
                .question_type
                .parse()
                .unwrap_or(QuestionType::ShortAnswer),
            options: serde_json::from_str(&self.options).unwrap_or_default(),
            correct_answer: self.correct_answer,
            points: self.points,
            position: self.position,
        }
    }
}
