use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    assignments::{
        entities::AssignmentStatus,
        responses::{AssignmentDetailResponse, MySubmissionSummary},
    },
    users::entities::UserRole,
};
use crate::services::courses::can_manage_course;

pub async fn get_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(error_response(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve assignment: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assignment: {e}"),
            ));
        }
    };

    let is_manager = match storage.get_course_by_id(assignment.course_id).await {
        Ok(Some(course)) => can_manage_course(&user, &course),
        Ok(None) => false,
        Err(e) => {
            tracing::error!("Failed to retrieve course: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course: {e}"),
            ));
        }
    };

    // 草稿作业对非管理者不可见
    if assignment.status == AssignmentStatus::Draft && !is_manager {
        return Ok(error_response(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ));
    }

    // 学习者视角附本人提交摘要
    let my_submission = if user.role == UserRole::Learner {
        match storage
            .get_submission_by_assignment_and_user(assignment_id, user.id)
            .await
        {
            Ok(submission) => submission.map(|s| MySubmissionSummary {
                id: s.id,
                status: s.status,
                is_late: s.is_late,
                score: s.score,
                submitted_at: s.submitted_at,
            }),
            Err(e) => {
                tracing::error!("Failed to retrieve submission: {}", e);
                return Ok(error_response(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve submission: {e}"),
                ));
            }
        }
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentDetailResponse {
            assignment,
            my_submission,
        },
        "Assignment retrieved successfully",
    )))
}
