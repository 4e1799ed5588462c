use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::courses::can_manage_course;

pub async fn get_submission(
    service: &SubmissionService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(error_response(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve submission: {}", e);
            return Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve submission: {e}"),
            ));
        }
    };

    // 只有提交者本人或课程管理者可以查看
    if submission.user_id != user.id {
        let authorized = match storage.get_assignment_by_id(submission.assignment_id).await {
            Ok(Some(assignment)) => match storage.get_course_by_id(assignment.course_id).await {
                Ok(Some(course)) => can_manage_course(&user, &course),
                Ok(None) => false,
                Err(e) => {
                    tracing::error!("Failed to retrieve course: {}", e);
                    return Ok(error_response(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve course: {e}"),
                    ));
                }
            },
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Failed to retrieve assignment: {}", e);
                return Ok(error_response(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment: {e}"),
                ));
            }
        };

        if !authorized {
            return Ok(error_response(
                ErrorCode::InsufficientPermissions,
                "You do not have access to this submission",
            ));
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}
