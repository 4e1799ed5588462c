use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, error_response_with_details,
    assignments::{entities::validate_points_weight, requests::CreateAssignmentRequest},
};
use crate::services::courses::can_manage_course;
use crate::storage::AssignmentWriteOutcome;

pub async fn create_assignment(
    service: &AssignmentService,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    if assignment_data.title.trim().is_empty() {
        return Ok(error_response(ErrorCode::BadRequest, "Title is required"));
    }

    if !validate_points_weight(assignment_data.points_weight) {
        return Ok(error_response(
            ErrorCode::BadRequest,
            "points_weight must be between 0.0 and 1.0",
        ));
    }

    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(error_response(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve course: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course: {e}"),
            ));
        }
    };

    if !can_manage_course(&user, &course) {
        return Ok(error_response(
            ErrorCode::InsufficientPermissions,
            "Only the course owner or an operator can create assignments",
        ));
    }

    match storage
        .create_assignment(course_id, user.id, assignment_data)
        .await
    {
        Ok(AssignmentWriteOutcome::Written(assignment)) => {
            tracing::info!(
                "Assignment {} created in course {} by user {}",
                assignment.id,
                course_id,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
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
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        Err(e) => {
            tracing::error!("Failed to create assignment: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            ))
        }
    }
}
