use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{
    ErrorCode,
    auth::responses::LoginResponse,
    auth::requests::LoginRequest,
    ApiResponse, error_response,
};
use crate::utils::password::verify_password;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let jwt = service.get_jwt(request);
    let config = service.get_config(request);

    // 1. 根据用户名或邮箱获取用户信息
    match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) => {
            // 2. 验证密码
            if verify_password(&login_request.password, &user.password_hash) {
                // 3. 更新最后登录时间
                let _ = storage.update_last_login(user.id).await;

                // 4. 生成令牌对（记住我时延长 refresh token 有效期）
                let refresh_expiry = login_request.remember_me.then(|| {
                    chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
                });

                match jwt.generate_token_pair(user.id, &user.role.to_string(), refresh_expiry) {
                    Ok(token_pair) => {
                        tracing::info!("User {} logged in successfully", user.username);

                        let response = LoginResponse {
                            access_token: token_pair.access_token,
                            expires_in: jwt.access_token_expiry_seconds(),
                            user,
                            created_at: chrono::Utc::now(),
                        };

                        let refresh_cookie =
                            jwt.create_refresh_token_cookie(&token_pair.refresh_token);

                        Ok(HttpResponse::Ok()
                            .cookie(refresh_cookie)
                            .json(ApiResponse::success(response, "Login successful")))
                    }
                    Err(e) => {
                        tracing::error!("Failed to generate JWT token: {}", e);
                        Ok(error_response(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to generate token",
                        ))
                    }
                }
            } else {
                Ok(error_response(
                    ErrorCode::AuthFailed,
                    "Username or password is incorrect",
                ))
            }
        }
        Ok(None) => Ok(error_response(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        )),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            ))
        }
    }
}
