use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 禁止删除当前登录账号
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(error_response(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete the currently logged-in user",
        ));
    }

    let storage = service.get_storage(request);

    match storage.delete_user(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "User deleted successfully",
        ))),
        Ok(false) => Ok(error_response(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            tracing::error!("Failed to delete user: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to delete user: {e}"),
            ))
        }
    }
}
