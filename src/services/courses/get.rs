use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_manage_course};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, courses::entities::CourseStatus,
};

pub async fn get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    match storage.get_course_detail(course_id).await {
        Ok(Some(detail)) => {
            // 未发布课程只有所有者 / 运营 / 已选学员可见
            if detail.course.status != CourseStatus::Published
                && !can_manage_course(&user, &detail.course)
                && !storage
                    .has_active_enrollment(course_id, user.id)
                    .await
                    .unwrap_or(false)
            {
                return Ok(error_response(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                ));
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Course retrieved successfully",
            )))
        }
        Ok(None) => Ok(error_response(
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        Err(e) => {
            tracing::error!("Failed to retrieve course: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course: {e}"),
            ))
        }
    }
}
