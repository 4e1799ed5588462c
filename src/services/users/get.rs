use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode, auth::responses::UserInfoResponse, error_response,
};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User retrieved successfully",
        ))),
        Ok(None) => Ok(error_response(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            tracing::error!("Failed to retrieve user: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve user: {e}"),
            ))
        }
    }
}
