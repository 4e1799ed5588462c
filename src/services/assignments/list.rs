use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    assignments::requests::{AssignmentListParams, AssignmentListQuery},
};
use crate::services::courses::can_manage_course;

pub async fn list_assignments(
    service: &AssignmentService,
    course_id: i64,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(error_response(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve course: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course: {e}"),
            ));
        }
    };

    // 草稿作业只有课程管理者可见
    let list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
        exclude_draft: !can_manage_course(&user, &course),
    };

    match storage
        .list_assignments_with_pagination(course_id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve assignment list: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assignment list: {e}"),
            ))
        }
    }
}
