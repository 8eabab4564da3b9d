//! Accounts and role profiles

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{students, users};
use crate::errors::{DlmsError, Result};
use crate::models::{
    PaginationInfo,
    academics::{
        entities::{AccountProfile, NewRoleProfile, StudentProfile},
        taxonomy::FavId,
    },
    users::{
        entities::{User, UserRole},
        requests::{NewUser, UpdateUserRequest, UserListQuery},
        responses::{UserListItem, UserListResponse},
    },
};
use crate::utils::escape_like_pattern;
use chrono::Datelike;
use std::collections::HashMap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::warn;

/// Attempts at issuing a FAV ID before giving up on concurrent registrations
const FAV_ID_RETRIES: usize = 3;

impl SeaOrmStorage {
    /// Creates the account and its role profile together
    pub async fn create_user_with_profile_impl(
        &self,
        user: NewUser,
        profile: NewRoleProfile,
    ) -> Result<(User, Option<StudentProfile>)> {
        let is_student = matches!(profile, NewRoleProfile::Student { .. });
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.insert_account(user.clone(), profile.clone()).await {
                // two registrations may race for the same FAV ID
                Err(e) if e.is_conflict() && is_student && attempt < FAV_ID_RETRIES => {
                    if self.get_user_by_email_impl(&user.email).await?.is_some() {
                        return Err(e);
                    }
                    warn!("FAV ID collision on attempt {attempt}, retrying");
                }
                result => return result,
            }
        }
    }

    async fn insert_account(
        &self,
        user: NewUser,
        profile: NewRoleProfile,
    ) -> Result<(User, Option<StudentProfile>)> {
        let now = chrono::Utc::now();
        let ts = now.timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let row = UserActiveModel {
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            full_name: Set(user.full_name),
            phone: Set(user.phone),
            avatar_url: Set(None),
            role: Set(user.role.to_string()),
            status: Set(user.status.to_string()),
            last_login: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to create user"))?;

        let student = match profile {
            NewRoleProfile::Admin => None,
            NewRoleProfile::Student {
                grade_level,
                section,
                stream,
            } => {
                let fav_id = next_fav_id(&txn, now.year()).await?;
                let student = StudentActiveModel {
                    user_id: Set(row.id),
                    fav_id: Set(fav_id.to_string()),
                    grade_level: Set(grade_level.value()),
                    section: Set(section.to_string()),
                    stream: Set(stream.map(|s| s.to_string())),
                    enrolled_at: Set(ts),
                }
                .insert(&txn)
                .await
                .map_err(db_error("Failed to create student profile"))?;
                Some(student.into_profile())
            }
            NewRoleProfile::Teacher {
                subject,
                qualification,
            } => {
                TeacherActiveModel {
                    user_id: Set(row.id),
                    subject: Set(subject.to_string()),
                    qualification: Set(qualification),
                }
                .insert(&txn)
                .await
                .map_err(db_error("Failed to create teacher profile"))?;
                None
            }
            NewRoleProfile::Parent {
                occupation,
                address,
            } => {
                ParentActiveModel {
                    user_id: Set(row.id),
                    occupation: Set(occupation),
                    address: Set(address),
                }
                .insert(&txn)
                .await
                .map_err(db_error("Failed to create parent profile"))?;
                None
            }
        };

        txn.commit()
            .await
            .map_err(db_error("Failed to commit registration"))?;

        Ok((row.into_user(), student))
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// Email address or FAV ID
    pub async fn get_user_by_identifier_impl(&self, identifier: &str) -> Result<Option<User>> {
        let Ok(fav_id) = FavId::parse(identifier) else {
            return self.get_user_by_email_impl(identifier).await;
        };

        let result = Students::find()
            .filter(students::Column::FavId.eq(fav_id.as_str()))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.and_then(|(_, user)| user).map(|m| m.into_user()))
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::Email.contains(&escaped))
                    .add(users::Column::FullName.contains(&escaped))
                    .add(users::Column::Phone.contains(&escaped)),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(users::Column::Role.eq(role.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(users::Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count users"))?;

        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list users"))?;

        let student_ids: Vec<i64> = items
            .iter()
            .filter(|m| m.role == UserRole::Student.to_string())
            .map(|m| m.id)
            .collect();
        let mut fav_ids: HashMap<i64, FavId> = HashMap::new();
        if !student_ids.is_empty() {
            let rows = Students::find()
                .filter(students::Column::UserId.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(db_error("Failed to load FAV IDs"))?;
            fav_ids.extend(rows.into_iter().map(|s| (s.user_id, FavId::from_stored(s.fav_id))));
        }

        Ok(UserListResponse {
            items: items
                .into_iter()
                .map(|m| UserListItem {
                    fav_id: fav_ids.remove(&m.id),
                    user: m.into_user(),
                })
                .collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                users::Column::LastLogin,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update last login"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?
        else {
            return Ok(None);
        };

        let mut model: UserActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(email) = update.email {
            model.email = Set(email.trim().to_lowercase());
        }
        if let Some(password_hash) = update.password {
            model.password_hash = Set(password_hash);
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone).filter(|p| !p.is_empty()));
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url).filter(|a| !a.is_empty()));
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update user"))?;

        Ok(Some(updated.into_user()))
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    /// Role profile rows attached to an account
    pub async fn get_account_profile_impl(
        &self,
        user_id: i64,
        role: UserRole,
    ) -> Result<AccountProfile> {
        let mut profile = AccountProfile::default();

        match role {
            UserRole::Admin => {}
            UserRole::Student => {
                profile.student = Students::find_by_id(user_id)
                    .one(&self.db)
                    .await
                    .map_err(db_error("Failed to load student profile"))?
                    .map(|m| m.into_profile());
            }
            UserRole::Teacher => {
                profile.teacher = Teachers::find_by_id(user_id)
                    .one(&self.db)
                    .await
                    .map_err(db_error("Failed to load teacher profile"))?
                    .map(|m| m.into_profile());
            }
            UserRole::Parent => {
                profile.parent = Parents::find_by_id(user_id)
                    .one(&self.db)
                    .await
                    .map_err(db_error("Failed to load parent profile"))?
                    .map(|m| m.into_profile());
            }
        }

        Ok(profile)
    }

    pub(crate) async fn count_users_where(&self, condition: Condition) -> Result<u64> {
        Users::find()
            .filter(condition)
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count users"))
    }
}

/// Next free FAV ID for the enrolment year
async fn next_fav_id<C: ConnectionTrait>(conn: &C, year: i32) -> Result<FavId> {
    let prefix = FavId::year_prefix(year);
    let last = Students::find()
        .filter(students::Column::FavId.starts_with(&prefix))
        .order_by_desc(students::Column::FavId)
        .one(conn)
        .await
        .map_err(db_error("Failed to read last FAV ID"))?;

    let next = last
        .map(|m| FavId::from_stored(m.fav_id).sequence())
        .unwrap_or(0)
        + 1;

    FavId::new(year, next)
        .map_err(|_| DlmsError::validation(format!("FAV ID sequence exhausted for {year}")))
}
