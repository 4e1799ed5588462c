use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    assignments::entities::AssignmentStatus,
    submissions::entities::{SubmissionStatus, SubmitRejection},
    submissions::requests::SubmitRequest,
};
use crate::storage::SubmitOutcome;
use crate::utils::validate::validate_link;

pub async fn submit(
    service: &AssignmentService,
    assignment_id: i64,
    submit_data: SubmitRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    if submit_data.content.trim().is_empty() {
        return Ok(error_response(ErrorCode::BadRequest, "Content is required"));
    }

    if let Some(ref link) = submit_data.link
        && let Err(msg) = validate_link(link)
    {
        return Ok(error_response(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);
    let now = chrono::Utc::now();

    match storage
        .submit_assignment(assignment_id, user_id, submit_data, now)
        .await
    {
        Ok(SubmitOutcome::Accepted {
            submission,
            decision,
        }) => {
            tracing::info!(
                "User {} submitted assignment {} (late: {})",
                user_id,
                assignment_id,
                decision.is_late
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                if decision.is_late {
                    "Submission accepted (late)"
                } else {
                    "Submission accepted"
                },
            )))
        }
        Ok(SubmitOutcome::AssignmentNotFound) => Ok(error_response(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Ok(SubmitOutcome::Rejected(rejection)) => Ok(rejection_response(rejection)),
        Err(e) => {
            tracing::error!("Failed to submit assignment: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to submit assignment: {e}"),
            ))
        }
    }
}

/// 提交被拒绝时的错误响应
///
/// 已存在的提交无论处于 submitted 还是 graded，对外都是
/// SUBMISSION_ALREADY_EXISTS，消息区分原因。
fn rejection_response(rejection: SubmitRejection) -> HttpResponse {
    match rejection {
        SubmitRejection::NotEnrolled => error_response(
            ErrorCode::NotEnrolled,
            "You are not enrolled in this course",
        ),
        // 草稿作业对学习者不可见
        SubmitRejection::AssignmentNotOpen {
            status: AssignmentStatus::Draft,
        } => error_response(ErrorCode::AssignmentNotFound, "Assignment not found"),
        SubmitRejection::AssignmentNotOpen { .. } => error_response(
            ErrorCode::AssignmentClosed,
            "Assignment is no longer accepting submissions",
        ),
        SubmitRejection::PastDueDate => error_response(
            ErrorCode::SubmissionPastDueDate,
            "The due date has passed and late submissions are not allowed",
        ),
        SubmitRejection::AlreadyExists {
            status: SubmissionStatus::Graded,
        } => error_response(
            ErrorCode::SubmissionAlreadyExists,
            "Submission already graded and resubmission is not allowed",
        ),
        SubmitRejection::AlreadyExists { .. } => error_response(
            ErrorCode::SubmissionAlreadyExists,
            "Submission already exists and resubmission is not allowed",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn error_code_of(resp: HttpResponse) -> String {
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"]["code"].as_str().unwrap().to_string()
    }

    #[actix_web::test]
    async fn test_duplicate_submission_maps_to_already_exists() {
        // submitted 和 graded 的已有提交都报 SUBMISSION_ALREADY_EXISTS
        for status in [SubmissionStatus::Submitted, SubmissionStatus::Graded] {
            let resp = rejection_response(SubmitRejection::AlreadyExists { status });
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_code_of(resp).await, "SUBMISSION_ALREADY_EXISTS");
        }
    }

    #[actix_web::test]
    async fn test_draft_assignment_submit_reports_not_found() {
        let resp = rejection_response(SubmitRejection::AssignmentNotOpen {
            status: AssignmentStatus::Draft,
        });
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_code_of(resp).await, "ASSIGNMENT_NOT_FOUND");
    }
}
