//! Role dashboards

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{access, current_user, forbidden, internal, ok};
use crate::models::{ErrorCode, users::entities::UserRole};

define_service!(AnalyticsService);

impl AnalyticsService {
    pub async fn admin_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let dashboard = storage
            .admin_dashboard()
            .await
            .map_err(internal("Failed to build admin dashboard"))?;

        ok(dashboard, "Dashboard retrieved")
    }

    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        let dashboard = storage
            .teacher_dashboard(user.id)
            .await
            .map_err(internal("Failed to build teacher dashboard"))?;

        ok(dashboard, "Dashboard retrieved")
    }

    /// The caller's own dashboard, students only
    pub async fn student_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = current_user(request)?;
        if user.role != UserRole::Student {
            return Err(forbidden(
                ErrorCode::Forbidden,
                "Only students have a personal dashboard",
            ));
        }
        self.dashboard_for(request, user.id).await
    }

    /// A student's dashboard as seen by staff, the student or an approved parent
    pub async fn student_dashboard_for(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = current_user(request)?;

        access::ensure_can_view_student(&storage, &user, student_id).await?;
        self.dashboard_for(request, student_id).await
    }

    async fn dashboard_for(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let student = access::student_summary(&storage, student_id).await?;
        let dashboard = storage
            .student_dashboard(student)
            .await
            .map_err(internal("Failed to build student dashboard"))?;

        ok(dashboard, "Dashboard retrieved")
    }
}
