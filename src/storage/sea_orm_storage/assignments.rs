//! Homework assignments

use super::{SeaOrmStorage, db_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    academics::requests::AudienceScope,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

/// Restricts a query on a class-targeted table to what the scope may see
pub(crate) fn scoped<E, C>(
    select: Select<E>,
    scope: &AudienceScope,
    teacher_col: C,
    grade_col: C,
    section_col: C,
) -> Select<E>
where
    E: sea_orm::EntityTrait,
    C: ColumnTrait,
{
    match scope {
        AudienceScope::All => select,
        AudienceScope::Teacher(teacher_id) => select.filter(teacher_col.eq(*teacher_id)),
        AudienceScope::Class {
            grade_level,
            section,
        } => select.filter(grade_col.eq(grade_level.value())).filter(
            Condition::any()
                .add(section_col.is_null())
                .add(section_col.eq(section.as_str())),
        ),
    }
}

impl SeaOrmStorage {
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            subject: Set(req.subject.to_string()),
            grade_level: Set(req.grade_level.value()),
            section: Set(req.section.map(String::from)),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            max_score: Set(req.max_score),
            allow_late: Set(req.allow_late),
            attachment_token: Set(req.attachment_token),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create assignment"))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load assignment"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        let mut select = scoped(
            Assignments::find(),
            &query.scope,
            Column::TeacherId,
            Column::GradeLevel,
            Column::Section,
        );

        if let Some(subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject.to_string()));
        }
        if let Some(grade_level) = query.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level.value()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count assignments"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list assignments"))?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_assignment()).collect(),
            query.page,
            query.size,
            total,
        ))
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load assignment"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }
        if let Some(token) = update.attachment_token {
            model.attachment_token = Set(Some(token).filter(|t| !t.is_empty()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update assignment"))?;

        Ok(Some(updated.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete assignment"))?;

        Ok(result.rows_affected > 0)
    }
}
