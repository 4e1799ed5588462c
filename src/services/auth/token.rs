use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode, error_response, auth::responses::RefreshTokenResponse,
};
use crate::utils::jwt::JwtUtils;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let jwt = service.get_jwt(request);

    // Refresh token 只通过 HttpOnly Cookie 传递
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(error_response(
            ErrorCode::Unauthorized,
            "Refresh token not found",
        ));
    };

    match jwt.refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: jwt.access_token_expiry_seconds(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Token refreshed")))
        }
        Err(e) => {
            tracing::warn!("Refresh token rejected: {}", e);
            Ok(error_response(
                ErrorCode::Unauthorized,
                "Refresh token is invalid or expired",
            ))
        }
    }
}
