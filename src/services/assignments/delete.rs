use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, require_manageable_assignment};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    if let Err(resp) = require_manageable_assignment(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    // 软删除：行保留，提交与成绩历史不受影响
    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            tracing::info!("Assignment {} deleted by user {}", assignment_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(error_response(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => {
            tracing::error!("Failed to delete assignment: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to delete assignment: {e}"),
            ))
        }
    }
}
