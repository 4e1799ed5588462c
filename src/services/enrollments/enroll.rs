use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, courses::entities::CourseStatus,
};
use crate::storage::EnrollOutcome;

pub async fn enroll(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    // 只能选已发布的课程
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

    if course.status != CourseStatus::Published {
        return Ok(error_response(
            ErrorCode::CourseNotPublished,
            "Course is not published",
        ));
    }

    match storage.enroll_user(course_id, user_id).await {
        Ok(EnrollOutcome::Enrolled(enrollment)) => {
            tracing::info!("User {} enrolled in course {}", user_id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Enrolled successfully")))
        }
        Ok(EnrollOutcome::AlreadyEnrolled) => Ok(error_response(
            ErrorCode::AlreadyEnrolled,
            "Already enrolled in this course",
        )),
        Err(e) => {
            tracing::error!("Failed to enroll: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to enroll: {e}"),
            ))
        }
    }
}
