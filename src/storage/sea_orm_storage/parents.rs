//! Parent-child links

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{parent_child_links, students, users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    academics::entities::StudentSummary,
    parents::{
        entities::{LinkStatus, ParentChildLink, ParentChildLinkDetail},
        requests::LinkListQuery,
        responses::{ChildSummary, LinkListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_link_impl(
        &self,
        parent_id: i64,
        student_id: i64,
        relationship: Option<String>,
    ) -> Result<ParentChildLink> {
        let model = LinkActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            relationship: Set(relationship),
            status: Set(LinkStatus::Pending.to_string()),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create link"))?;

        Ok(result.into_link())
    }

    pub async fn find_active_link_impl(
        &self,
        parent_id: i64,
        student_id: i64,
    ) -> Result<Option<ParentChildLink>> {
        let result = ParentChildLinks::find()
            .filter(parent_child_links::Column::ParentId.eq(parent_id))
            .filter(parent_child_links::Column::StudentId.eq(student_id))
            .filter(parent_child_links::Column::Status.is_in([
                LinkStatus::Pending.to_string(),
                LinkStatus::Approved.to_string(),
            ]))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load link"))?;

        Ok(result.map(|m| m.into_link()))
    }

    pub async fn get_link_impl(&self, id: i64) -> Result<Option<ParentChildLink>> {
        let result = ParentChildLinks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load link"))?;

        Ok(result.map(|m| m.into_link()))
    }

    pub async fn list_links_impl(&self, query: LinkListQuery) -> Result<LinkListResponse> {
        let mut select = ParentChildLinks::find();

        if let Some(parent_id) = query.parent_id {
            select = select.filter(parent_child_links::Column::ParentId.eq(parent_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(parent_child_links::Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(parent_child_links::Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(parent_child_links::Column::CreatedAt)
            .order_by_desc(parent_child_links::Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count links"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list links"))?;

        let links: Vec<ParentChildLink> = rows.into_iter().map(|m| m.into_link()).collect();
        let items = self.link_details(links).await?;

        Ok(LinkListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    /// Moves a pending link to its reviewed state
    pub async fn review_link_impl(
        &self,
        id: i64,
        reviewer_id: i64,
        status: LinkStatus,
    ) -> Result<Option<ParentChildLink>> {
        let result = ParentChildLinks::update_many()
            .col_expr(
                parent_child_links::Column::Status,
                Expr::value(status.to_string()),
            )
            .col_expr(
                parent_child_links::Column::ReviewedBy,
                Expr::value(reviewer_id),
            )
            .col_expr(
                parent_child_links::Column::ReviewedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(parent_child_links::Column::Id.eq(id))
            .filter(parent_child_links::Column::Status.eq(LinkStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to review link"))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_link_impl(id).await
    }

    pub async fn delete_link_impl(&self, id: i64) -> Result<bool> {
        let result = ParentChildLinks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete link"))?;

        Ok(result.rows_affected > 0)
    }

    /// Approved children of a parent
    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<ChildSummary>> {
        let links = ParentChildLinks::find()
            .filter(parent_child_links::Column::ParentId.eq(parent_id))
            .filter(parent_child_links::Column::Status.eq(LinkStatus::Approved.to_string()))
            .order_by_asc(parent_child_links::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list children"))?;

        let student_ids: Vec<i64> = links.iter().map(|l| l.student_id).collect();
        let students = self.student_summaries(&student_ids).await?;

        Ok(links
            .into_iter()
            .filter_map(|link| {
                students.get(&link.student_id).cloned().map(|student| ChildSummary {
                    link: link.into_link(),
                    student,
                })
            })
            .collect())
    }

    pub async fn is_parent_of_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = ParentChildLinks::find()
            .filter(parent_child_links::Column::ParentId.eq(parent_id))
            .filter(parent_child_links::Column::StudentId.eq(student_id))
            .filter(parent_child_links::Column::Status.eq(LinkStatus::Approved.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to check link"))?;

        Ok(count > 0)
    }

    /// Student summaries keyed by user id
    pub(crate) async fn student_summaries(
        &self,
        student_ids: &[i64],
    ) -> Result<HashMap<i64, StudentSummary>> {
        if student_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .filter(students::Column::UserId.is_in(student_ids.iter().copied()))
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load students"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(student, user)| {
                user.map(|user| (student.user_id, student.into_summary(&user)))
            })
            .collect())
    }

    /// Account rows keyed by id
    pub(crate) async fn users_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, UserModel>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load users"))?;

        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }

    async fn link_details(&self, links: Vec<ParentChildLink>) -> Result<Vec<ParentChildLinkDetail>> {
        let parent_ids: Vec<i64> = links.iter().map(|l| l.parent_id).collect();
        let student_ids: Vec<i64> = links.iter().map(|l| l.student_id).collect();
        let parents = self.users_by_ids(&parent_ids).await?;
        let students = self.student_summaries(&student_ids).await?;

        Ok(links
            .into_iter()
            .filter_map(|link| {
                let parent = parents.get(&link.parent_id)?;
                let student = students.get(&link.student_id)?.clone();
                Some(ParentChildLinkDetail {
                    parent_name: parent.full_name.clone(),
                    parent_email: parent.email.clone(),
                    student,
                    link,
                })
            })
            .collect())
    }
}
