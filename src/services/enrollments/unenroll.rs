use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};

pub async fn unenroll(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    // 历史提交保留，只是选课状态置为 cancelled
    match storage.unenroll_user(course_id, user_id).await {
        Ok(true) => {
            tracing::info!("User {} unenrolled from course {}", user_id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Unenrolled successfully")))
        }
        Ok(false) => Ok(error_response(
            ErrorCode::EnrollmentNotFound,
            "No active enrollment for this course",
        )),
        Err(e) => {
            tracing::error!("Failed to unenroll: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to unenroll: {e}"),
            ))
        }
    }
}
