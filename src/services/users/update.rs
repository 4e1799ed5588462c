use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode, auth::responses::UserInfoResponse, error_response,
    users::requests::UpdateUserRequest,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证邮箱
    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(error_response(ErrorCode::UserEmailInvalid, msg));
    }

    // 更新密码时重新哈希
    if let Some(ref password) = update_data.password {
        let password_check = validate_password(password);
        if !password_check.is_valid {
            return Ok(error_response(
                ErrorCode::UserPasswordInvalid,
                password_check.error_message(),
            ));
        }

        let config = service.get_config(request);
        update_data.password = match hash_password(password, &config.argon2) {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!("Password hashing failed: {}", e);
                return Ok(error_response(
                    ErrorCode::InternalServerError,
                    "User update failed",
                ));
            }
        };
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User updated successfully",
        ))),
        Ok(None) => Ok(error_response(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            let msg = format!("User update failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(error_response(
                    ErrorCode::UserAlreadyExists,
                    "Email already exists",
                ))
            } else {
                Ok(error_response(ErrorCode::InternalServerError, msg))
            }
        }
    }
}
