use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};

pub async fn instructor_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    match storage.instructor_dashboard(user_id).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve instructor dashboard: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve dashboard: {e}"),
            ))
        }
    }
}
