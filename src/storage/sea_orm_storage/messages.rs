//! Direct messages between users

use super::{SeaOrmStorage, db_error};
use crate::entity::messages::Column;
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    messages::{
        entities::{Correspondent, Message, MessageView},
        requests::{Mailbox, MessageListQuery, SendMessageRequest},
        responses::MessageListResponse,
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use std::collections::HashMap;

fn correspondent(id: i64, users: &HashMap<i64, UserModel>) -> Correspondent {
    match users.get(&id) {
        Some(user) => Correspondent {
            id,
            full_name: user.full_name.clone(),
            role: user.role.parse().unwrap_or(UserRole::Student),
        },
        None => Correspondent {
            id,
            full_name: String::new(),
            role: UserRole::Student,
        },
    }
}

impl SeaOrmStorage {
    pub async fn create_message_impl(&self, sender_id: i64, req: SendMessageRequest) -> Result<Message> {
        let model = MessageActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(req.recipient_id),
            subject: Set(req
                .subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())),
            body: Set(req.body.trim().to_string()),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            read_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to send message"))?;

        Ok(result.into_message())
    }

    pub async fn get_message_impl(&self, id: i64) -> Result<Option<MessageView>> {
        let Some(message) = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load message"))?
        else {
            return Ok(None);
        };

        Ok(self.message_views(vec![message]).await?.pop())
    }

    pub async fn list_messages_impl(&self, query: MessageListQuery) -> Result<MessageListResponse> {
        let mut select = match query.mailbox {
            Mailbox::Inbox => Messages::find().filter(Column::RecipientId.eq(query.user_id)),
            Mailbox::Sent => Messages::find().filter(Column::SenderId.eq(query.user_id)),
        };

        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Failed to count messages"))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error("Failed to list messages"))?;

        Ok(MessageListResponse {
            items: self.message_views(rows).await?,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    async fn message_views(&self, rows: Vec<MessageModel>) -> Result<Vec<MessageView>> {
        let mut ids: Vec<i64> = rows
            .iter()
            .flat_map(|m| [m.sender_id, m.recipient_id])
            .collect();
        ids.sort_unstable();
        ids.dedup();
        let users = self.users_by_ids(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|m| MessageView {
                sender: correspondent(m.sender_id, &users),
                recipient: correspondent(m.recipient_id, &users),
                message: m.into_message(),
            })
            .collect())
    }

    /// First read stamps `read_at`; later reads leave it alone
    pub async fn mark_message_read_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .col_expr(Column::ReadAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to mark message read"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn unread_count_impl(&self, user_id: i64) -> Result<i64> {
        let count = Messages::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count unread messages"))?;

        Ok(count as i64)
    }

    pub async fn delete_message_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete message"))?;

        Ok(result.rows_affected > 0)
    }
}
