use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, grades::requests::GradeReportParams,
};

pub async fn my_grades(
    service: &GradeService,
    params: GradeReportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    match storage.grade_report(user_id, params).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Grade report retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve grade report: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve grade report: {e}"),
            ))
        }
    }
}
