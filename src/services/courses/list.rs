use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    courses::requests::{CourseListParams, CourseListQuery},
    users::entities::UserRole,
};

pub async fn list_courses(
    service: &CourseService,
    query: CourseListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let mine = query.mine.unwrap_or(false);

    // 视角选择：
    // - mine=true：讲师看名下课程（全部状态），学习者看已选课程，运营看全量
    // - 其余：公共目录，仅已发布课程（运营除外）
    let list_query = match (user.role.clone(), mine) {
        (UserRole::Instructor, true) => CourseListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            search: query.search,
            category_id: query.category_id,
            owner_id: Some(user.id),
            enrolled_user_id: None,
            published_only: false,
        },
        (UserRole::Learner, true) => CourseListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            search: query.search,
            category_id: query.category_id,
            owner_id: None,
            enrolled_user_id: Some(user.id),
            published_only: false,
        },
        (UserRole::Operator, _) => CourseListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            search: query.search,
            category_id: query.category_id,
            owner_id: None,
            enrolled_user_id: None,
            published_only: false,
        },
        _ => CourseListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            search: query.search,
            category_id: query.category_id,
            owner_id: None,
            enrolled_user_id: None,
            published_only: true,
        },
    };

    let storage = service.get_storage(request);

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve course list: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course list: {e}"),
            ))
        }
    }
}
