use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode, auth::responses::UserInfoResponse, error_response,
    users::requests::CreateUserRequest,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证用户名
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(error_response(ErrorCode::UserNameInvalid, msg));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(error_response(ErrorCode::UserEmailInvalid, msg));
    }

    // 验证密码强度
    let password_check = validate_password(&user_data.password);
    if !password_check.is_valid {
        return Ok(error_response(
            ErrorCode::UserPasswordInvalid,
            password_check.error_message(),
        ));
    }

    let config = service.get_config(request);
    user_data.password = match hash_password(&user_data.password, &config.argon2) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                "User creation failed",
            ));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(
            UserInfoResponse { user },
            "User created successfully",
        ))),
        Err(e) => {
            let msg = format!("User creation failed: {e}");
            error!("{}", msg);
            // 判断是否唯一约束冲突
            if msg.contains("UNIQUE constraint failed") {
                Ok(error_response(
                    ErrorCode::UserAlreadyExists,
                    "Username or email already exists",
                ))
            } else {
                Ok(error_response(ErrorCode::InternalServerError, msg))
            }
        }
    }
}
