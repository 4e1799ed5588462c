use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, require_manageable_assignment};
use crate::errors::LMSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response, error_response_with_details,
    assignments::{
        entities::TransitionRejection, requests::ChangeAssignmentStatusRequest,
    },
};
use crate::storage::StatusChangeOutcome;

pub async fn change_status(
    service: &AssignmentService,
    assignment_id: i64,
    status_data: ChangeAssignmentStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    if let Err(resp) = require_manageable_assignment(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    match storage
        .change_assignment_status(assignment_id, status_data.status)
        .await
    {
        Ok(StatusChangeOutcome::Changed(assignment)) => {
            tracing::info!(
                "Assignment {} status changed to {} by user {}",
                assignment_id,
                assignment.status,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Assignment status changed successfully",
            )))
        }
        Ok(StatusChangeOutcome::NotFound) => Ok(error_response(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Ok(StatusChangeOutcome::Rejected(TransitionRejection::Unreachable {
            current,
            requested,
        })) => Ok(error_response_with_details(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot transition assignment from {current} to {requested}"),
            serde_json::json!({
                "current": current,
                "requested": requested,
            }),
        )),
        Ok(StatusChangeOutcome::Rejected(TransitionRejection::GradingStarted {
            current,
            requested,
        })) => Ok(error_response_with_details(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot reopen to {requested}: grading has already started"),
            serde_json::json!({
                "current": current,
                "requested": requested,
            }),
        )),
        // 状态守卫未命中：另一请求在读写之间改了状态
        Err(LMSystemError::StateConflict(msg)) => {
            tracing::warn!("Concurrent status change on assignment {}: {}", assignment_id, msg);
            Ok(error_response(
                ErrorCode::StateConflict,
                "Assignment status was changed concurrently, please retry",
            ))
        }
        Err(e) => {
            tracing::error!("Failed to change assignment status: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to change assignment status: {e}"),
            ))
        }
    }
}
