use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_manage_course};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};

pub async fn delete_course(
    service: &CourseService,
    course_id: i64,
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

    if !can_manage_course(&user, &course) {
        return Ok(error_response(
            ErrorCode::InsufficientPermissions,
            "Only the course owner or an operator can delete this course",
        ));
    }

    match storage.delete_course(course_id).await {
        Ok(true) => {
            tracing::info!("Course {} deleted by user {}", course_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Course deleted successfully",
            )))
        }
        Ok(false) => Ok(error_response(
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        Err(e) => {
            tracing::error!("Failed to delete course: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to delete course: {e}"),
            ))
        }
    }
}
