use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, require_manageable_assignment};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, error_response,
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
};

pub async fn list_submissions(
    service: &AssignmentService,
    assignment_id: i64,
    query: SubmissionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(error_response(ErrorCode::Unauthorized, "Not authenticated"));
    };

    let storage = service.get_storage(request);

    if let Err(resp) = require_manageable_assignment(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    let list_query = SubmissionListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
    };

    match storage
        .list_submissions_with_pagination(assignment_id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve submission list: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve submission list: {e}"),
            ))
        }
    }
}
