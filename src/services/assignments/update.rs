use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, require_manageable_assignment};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, error_response_with_details,
    assignments::{entities::validate_points_weight, requests::UpdateAssignmentRequest},
};
use crate::storage::AssignmentWriteOutcome;

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(error_response(ErrorCode::BadRequest, "Title is required"));
    }

    if let Some(weight) = update_data.points_weight
        && !validate_points_weight(weight)
    {
        return Ok(error_response(
            ErrorCode::BadRequest,
            "points_weight must be between 0.0 and 1.0",
        ));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = require_manageable_assignment(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(AssignmentWriteOutcome::Written(assignment)) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(assignment, "Assignment updated successfully"),
        )),
        Ok(AssignmentWriteOutcome::BudgetExceeded { available }) => {
            Ok(error_response_with_details(
                ErrorCode::WeightBudgetExceeded,
                format!(
                    "Course weight budget exceeded, {:.2} available",
                    available
                ),
                serde_json::json!({ "availableWeight": available }),
            ))
        }
        Ok(AssignmentWriteOutcome::NotFound) => Ok(error_response(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update assignment: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to update assignment: {e}"),
            ))
        }
    }
}
