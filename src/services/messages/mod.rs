//! Direct messages between users
//!
//! Students and parents write to teachers and admins only; staff may write
//! to anyone. A message is visible to its sender and recipient, and either
//! may delete it.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::{bad_request, created, current_user, forbidden, internal, invalid, not_found, ok, ok_empty};
use crate::models::{
    ErrorCode,
    messages::{
        entities::{MAX_BODY_CHARS, MAX_SUBJECT_CHARS, MessageView},
        requests::{Mailbox, MessageListParams, MessageListQuery, SendMessageRequest},
        responses::UnreadCountResponse,
    },
    users::entities::User,
};
use crate::storage::Storage;
use crate::utils::validate::validate_text_len;

define_service!(MessageService);

/// Message the user sent or received; anything else is reported missing
async fn load_visible(
    storage: &Arc<dyn Storage>,
    user: &User,
    message_id: i64,
) -> ActixResult<MessageView> {
    storage
        .get_message(message_id)
        .await
        .map_err(internal("Failed to load message"))?
        .filter(|view| view.message.sender_id == user.id || view.message.recipient_id == user.id)
        .ok_or_else(|| not_found(ErrorCode::MessageNotFound, "Message not found"))
}

fn validate_message(message: &SendMessageRequest) -> Result<(), String> {
    validate_text_len(&message.body, "Message body", 1, MAX_BODY_CHARS)?;
    if let Some(subject) = &message.subject
        && subject.chars().count() > MAX_SUBJECT_CHARS
    {
        return Err(format!(
            "Subject must be at most {MAX_SUBJECT_CHARS} characters"
        ));
    }
    Ok(())
}

impl MessageService {
    pub async fn send(
        &self,
        request: &HttpRequest,
        mut message: SendMessageRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        validate_message(&message).map_err(invalid(ErrorCode::BadRequest))?;
        if message.recipient_id == user.id {
            return Err(bad_request(
                ErrorCode::MessageRecipientInvalid,
                "You cannot message yourself",
            ));
        }

        let recipient = storage
            .get_user_by_id(message.recipient_id)
            .await
            .map_err(internal("Failed to load recipient"))?
            .filter(|r| r.is_active())
            .ok_or_else(|| {
                not_found(ErrorCode::MessageRecipientInvalid, "Recipient not found")
            })?;
        if !user.role.can_message(recipient.role) {
            return Err(forbidden(
                ErrorCode::MessageRecipientInvalid,
                format!("A {} cannot message a {}", user.role, recipient.role),
            ));
        }

        message.subject = message
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let sent = storage
            .create_message(user.id, message)
            .await
            .map_err(internal("Failed to send message"))?;

        info!("User {} messaged user {}", user.id, recipient.id);
        created(sent, "Message sent")
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        mailbox: Mailbox,
        params: MessageListParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let (page, size) = params.pagination.normalized();
        let messages = storage
            .list_messages(MessageListQuery {
                page,
                size,
                user_id: user.id,
                mailbox,
                unread_only: params.unread_only,
            })
            .await
            .map_err(internal("Failed to list messages"))?;

        ok(messages, "Messages retrieved")
    }

    /// Opening a received message marks it read
    pub async fn get(&self, request: &HttpRequest, message_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let mut view = load_visible(&storage, &user, message_id).await?;
        if view.message.recipient_id == user.id && !view.message.is_read {
            storage
                .mark_message_read(view.message.id)
                .await
                .map_err(internal("Failed to mark message read"))?;
            view.message.is_read = true;
            view.message.read_at.get_or_insert_with(Utc::now);
        }

        ok(view, "Message retrieved")
    }

    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let view = load_visible(&storage, &user, message_id).await?;
        if view.message.recipient_id != user.id {
            return Err(forbidden(
                ErrorCode::Forbidden,
                "Only the recipient can mark a message read",
            ));
        }
        storage
            .mark_message_read(message_id)
            .await
            .map_err(internal("Failed to mark message read"))?;

        ok_empty("Message marked as read")
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let unread_count = storage
            .unread_count(user.id)
            .await
            .map_err(internal("Failed to count unread messages"))?;

        ok(UnreadCountResponse { unread_count }, "Unread count retrieved")
    }

    pub async fn delete(&self, request: &HttpRequest, message_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        load_visible(&storage, &user, message_id).await?;
        let deleted = storage
            .delete_message(message_id)
            .await
            .map_err(internal("Failed to delete message"))?;
        if !deleted {
            return Err(not_found(ErrorCode::MessageNotFound, "Message not found"));
        }

        ok_empty("Message deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(subject: Option<&str>, body: &str) -> SendMessageRequest {
        SendMessageRequest {
            recipient_id: 2,
            subject: subject.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_message_limits() {
        assert!(validate_message(&message(Some("Homework"), "When is it due?")).is_ok());
        assert!(validate_message(&message(None, "   ")).is_err());
        assert!(validate_message(&message(None, &"a".repeat(MAX_BODY_CHARS + 1))).is_err());
        assert!(validate_message(&message(Some(&"s".repeat(201)), "Hi")).is_err());
    }
}
