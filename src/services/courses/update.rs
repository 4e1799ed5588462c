use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_manage_course};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, courses::requests::UpdateCourseRequest,
};

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    update_data: UpdateCourseRequest,
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
            "Only the course owner or an operator can update this course",
        ));
    }

    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(error_response(ErrorCode::BadRequest, "Title is required"));
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(course, "Course updated successfully"))),
        Ok(None) => Ok(error_response(
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update course: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to update course: {e}"),
            ))
        }
    }
}
