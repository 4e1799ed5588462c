use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    courses::requests::CreateCourseRequest,
    users::entities::UserRole,
};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    if course_data.title.trim().is_empty() {
        return Ok(error_response(ErrorCode::BadRequest, "Title is required"));
    }

    // 运营可代指定课程所有者，讲师只能创建自己的课程
    let owner_id = match (user.role.clone(), course_data.owner_id) {
        (UserRole::Operator, Some(owner_id)) => owner_id,
        _ => user.id,
    };

    let storage = service.get_storage(request);

    match storage
        .create_course(
            owner_id,
            course_data.title.trim().to_string(),
            course_data.description,
            course_data.category_id,
            course_data.difficulty_id,
        )
        .await
    {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => {
            tracing::error!("Failed to create course: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to create course: {e}"),
            ))
        }
    }
}
