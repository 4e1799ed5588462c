use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    auth::requests::RegisterRequest,
    auth::responses::UserInfoResponse,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

/// 公开注册入口：注册的账号固定为学习者角色，
/// 讲师 / 运营账号只能由运营在用户管理里创建。
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证用户名
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(error_response(ErrorCode::UserNameInvalid, msg));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(error_response(ErrorCode::UserEmailInvalid, msg));
    }

    // 验证密码强度
    let password_check = validate_password(&register_request.password);
    if !password_check.is_valid {
        return Ok(error_response(
            ErrorCode::UserPasswordInvalid,
            password_check.error_message(),
        ));
    }

    let config = service.get_config(request);
    let password_hash = match hash_password(&register_request.password, &config.argon2) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                "Registration failed",
            ));
        }
    };

    let storage = service.get_storage(request);

    let create_request = CreateUserRequest {
        username: register_request.username,
        email: register_request.email,
        password: password_hash,
        role: UserRole::Learner,
        display_name: register_request.display_name,
        avatar_url: None,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserInfoResponse { user },
                "Registration successful",
            )))
        }
        Err(e) => {
            let msg = format!("Registration failed: {e}");
            error!("{}", msg);
            // 判断是否唯一约束冲突
            if msg.contains("UNIQUE constraint failed") {
                Ok(error_response(
                    ErrorCode::UserAlreadyExists,
                    "Username or email already exists",
                ))
            } else {
                Ok(error_response(ErrorCode::RegisterFailed, msg))
            }
        }
    }
}
