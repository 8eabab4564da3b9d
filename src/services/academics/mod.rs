pub mod students;
pub mod teacher_assignments;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::academics::{
    requests::{
        CreateTeacherAssignmentRequest, StudentListParams, TeacherAssignmentListParams,
        UpdatePlacementRequest,
    },
    responses::TaxonomyResponse,
};
use crate::services::ok;

define_service!(AcademicsService);

impl AcademicsService {
    pub async fn taxonomy(&self) -> ActixResult<HttpResponse> {
        ok(TaxonomyResponse::build(), "School taxonomy")
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, query).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::get_student(self, request, student_id).await
    }

    pub async fn get_student_by_fav_id(
        &self,
        request: &HttpRequest,
        fav_id: &str,
    ) -> ActixResult<HttpResponse> {
        students::get_student_by_fav_id(self, request, fav_id).await
    }

    pub async fn update_placement(
        &self,
        request: &HttpRequest,
        student_id: i64,
        placement: UpdatePlacementRequest,
    ) -> ActixResult<HttpResponse> {
        students::update_placement(self, request, student_id, placement).await
    }

    pub async fn create_teacher_assignment(
        &self,
        request: &HttpRequest,
        assignment: CreateTeacherAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        teacher_assignments::create_teacher_assignment(self, request, assignment).await
    }

    pub async fn list_teacher_assignments(
        &self,
        request: &HttpRequest,
        params: TeacherAssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        teacher_assignments::list_teacher_assignments(self, request, params).await
    }

    pub async fn delete_teacher_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        teacher_assignments::delete_teacher_assignment(self, request, id).await
    }
}
