//! Parent-child links
//!
//! A parent asks for a link by the child's FAV ID and an admin approves or
//! rejects it. Only approved links open the child's records to the parent.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ErrorCode,
    academics::taxonomy::FavId,
    parents::{
        entities::LinkStatus,
        requests::{LinkListParams, LinkListQuery, RequestLinkRequest, ReviewLinkRequest},
        responses::ChildrenResponse,
    },
    users::entities::UserRole,
};
use crate::services::{
    access, bad_request, conflict, created, current_user, internal, not_found, ok, ok_empty,
    storage_error,
};
use crate::utils::validate::validate_text_len;

define_service!(ParentService);

impl ParentService {
    pub async fn request_link(
        &self,
        request: &HttpRequest,
        link_request: RequestLinkRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let parent = current_user(request)?;

        let fav_id = FavId::parse(&link_request.fav_id.trim().to_uppercase())
            .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
        let relationship = link_request
            .relationship
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if let Some(ref relationship) = relationship {
            validate_text_len(relationship, "Relationship", 1, 50)
                .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
        }

        let student = storage
            .get_student_by_fav_id(&fav_id)
            .await
            .map_err(internal("Failed to load student"))?
            .ok_or_else(|| {
                not_found(
                    ErrorCode::StudentNotFound,
                    format!("No student with FAV ID {fav_id}"),
                )
            })?;

        let existing = storage
            .find_active_link(parent.id, student.user_id)
            .await
            .map_err(internal("Failed to check existing links"))?;
        if existing.is_some() {
            return Err(conflict(
                ErrorCode::LinkAlreadyExists,
                "A pending or approved link to this student already exists",
            ));
        }

        let link = storage
            .create_link(parent.id, student.user_id, relationship)
            .await
            .map_err(storage_error("Link to this student", ErrorCode::LinkAlreadyExists))?;

        info!(
            "Parent {} requested link {} to student {}",
            parent.id, link.id, student.user_id
        );
        created(link, "Link requested, awaiting administrator approval")
    }

    /// Parents see their own links; admins see every link
    pub async fn list_links(
        &self,
        request: &HttpRequest,
        params: LinkListParams,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let (page, size) = params.pagination.normalized();
        let query = LinkListQuery {
            page,
            size,
            parent_id: (user.role == UserRole::Parent).then_some(user.id),
            student_id: None,
            status: params.status,
        };

        let links = storage
            .list_links(query)
            .await
            .map_err(internal("Failed to list links"))?;

        ok(links, "Links retrieved")
    }

    pub async fn review_link(
        &self,
        request: &HttpRequest,
        link_id: i64,
        review: ReviewLinkRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let admin = current_user(request)?;

        let link = storage
            .get_link(link_id)
            .await
            .map_err(internal("Failed to load link"))?
            .ok_or_else(|| not_found(ErrorCode::LinkNotFound, "Link not found"))?;
        if link.status != LinkStatus::Pending {
            return Err(conflict(
                ErrorCode::LinkNotPending,
                format!("Link has already been {}", link.status),
            ));
        }

        let status = review.decision.resulting_status();
        // None here means another reviewer got there first
        let reviewed = storage
            .review_link(link_id, admin.id, status)
            .await
            .map_err(internal("Failed to review link"))?
            .ok_or_else(|| conflict(ErrorCode::LinkNotPending, "Link is no longer pending"))?;

        info!("Admin {} marked link {} as {}", admin.id, link_id, status);
        ok(reviewed, "Link reviewed")
    }

    /// Admins remove any link; parents remove their own
    pub async fn remove_link(&self, request: &HttpRequest, link_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let link = storage
            .get_link(link_id)
            .await
            .map_err(internal("Failed to load link"))?
            .ok_or_else(|| not_found(ErrorCode::LinkNotFound, "Link not found"))?;
        access::ensure_owner(&user, link.parent_id, ErrorCode::Forbidden, "links")?;

        let deleted = storage
            .delete_link(link_id)
            .await
            .map_err(internal("Failed to delete link"))?;
        if !deleted {
            return Err(not_found(ErrorCode::LinkNotFound, "Link not found"));
        }

        ok_empty("Link removed")
    }

    pub async fn list_children(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let parent = current_user(request)?;

        let items = storage
            .list_children(parent.id)
            .await
            .map_err(internal("Failed to list children"))?;

        ok(ChildrenResponse { items }, "Children retrieved")
    }
}
