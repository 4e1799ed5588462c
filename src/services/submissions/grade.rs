use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    submissions::{
        entities::{GradeRejection, validate_grade_action},
        requests::GradeRequest,
    },
};
use crate::services::assignments::require_manageable_assignment;
use crate::storage::GradeOutcome;

pub async fn grade(
    service: &SubmissionService,
    submission_id: i64,
    grade_data: GradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    // 校验评分载荷
    if let Err(rejection) =
        validate_grade_action(grade_data.action, grade_data.score, &grade_data.feedback)
    {
        return Ok(match rejection {
            GradeRejection::MissingFeedback => {
                error_response(ErrorCode::MissingFeedback, "Feedback is required")
            }
            GradeRejection::InvalidScoreRange => error_response(
                ErrorCode::InvalidScoreRange,
                "Score must be between 0 and 100",
            ),
        });
    }

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

    // 评分权限等同作业管理权限
    if let Err(resp) =
        require_manageable_assignment(&storage, submission.assignment_id, &user).await
    {
        return Ok(resp);
    }

    // 以读到的状态做守卫更新：学生并发重交会让守卫落空
    match storage
        .grade_submission(
            submission_id,
            submission.status,
            grade_data.action,
            grade_data.score,
            grade_data.feedback,
            chrono::Utc::now(),
        )
        .await
    {
        Ok(GradeOutcome::Graded(submission)) => {
            tracing::info!(
                "Submission {} graded by user {} ({:?})",
                submission_id,
                user.id,
                grade_data.action
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission graded successfully",
            )))
        }
        Ok(GradeOutcome::NotFound) => Ok(error_response(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        )),
        Ok(GradeOutcome::Conflict) => Ok(error_response(
            ErrorCode::StateConflict,
            "Submission was modified concurrently, please review the latest version and retry",
        )),
        Err(e) => {
            tracing::error!("Failed to grade submission: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to grade submission: {e}"),
            ))
        }
    }
}
