//! Recorded marks

use super::{SeaOrmStorage, db_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model};
use crate::errors::Result;
use crate::models::grades::{
    entities::GradeRecord,
    requests::{GradeListParams, RecordGradeRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// Inserts or overwrites the mark for (student, subject, term, year)
    pub async fn upsert_grade_impl(
        &self,
        teacher_id: i64,
        req: RecordGradeRequest,
    ) -> Result<GradeRecord> {
        if let Some(existing) = self.find_grade_row(&req).await? {
            return self.overwrite_grade(existing, teacher_id, req).await;
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            student_id: Set(req.student_id),
            teacher_id: Set(teacher_id),
            subject: Set(req.subject.to_string()),
            term: Set(req.term),
            academic_year: Set(req.academic_year),
            score: Set(req.score),
            max_score: Set(req.max_score),
            remarks: Set(req.remarks.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await.map_err(db_error("Failed to record grade")) {
            Ok(row) => Ok(row.into_grade()),
            // a concurrent insert won the unique key; overwrite it instead
            Err(e) if e.is_conflict() => match self.find_grade_row(&req).await? {
                Some(existing) => self.overwrite_grade(existing, teacher_id, req).await,
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    async fn find_grade_row(&self, req: &RecordGradeRequest) -> Result<Option<Model>> {
        Grades::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::Subject.eq(req.subject.to_string()))
            .filter(Column::Term.eq(req.term))
            .filter(Column::AcademicYear.eq(req.academic_year))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load grade"))
    }

    async fn overwrite_grade(
        &self,
        existing: Model,
        teacher_id: i64,
        req: RecordGradeRequest,
    ) -> Result<GradeRecord> {
        let mut model: ActiveModel = existing.into();
        model.teacher_id = Set(teacher_id);
        model.score = Set(req.score);
        model.max_score = Set(req.max_score);
        model.remarks = Set(req.remarks);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update grade"))?;

        Ok(updated.into_grade())
    }

    pub async fn get_grade_impl(&self, id: i64) -> Result<Option<GradeRecord>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load grade"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_impl(
        &self,
        student_id: i64,
        params: GradeListParams,
    ) -> Result<Vec<GradeRecord>> {
        let mut select = Grades::find().filter(Column::StudentId.eq(student_id));

        if let Some(term) = params.term {
            select = select.filter(Column::Term.eq(term));
        }
        if let Some(academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }
        if let Some(subject) = params.subject {
            select = select.filter(Column::Subject.eq(subject.to_string()));
        }

        let rows = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Term)
            .order_by_asc(Column::Subject)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list grades"))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete grade"))?;

        Ok(result.rows_affected > 0)
    }
}
