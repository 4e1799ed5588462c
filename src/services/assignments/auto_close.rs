use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{
    ApiResponse, ErrorCode, error_response, assignments::responses::AutoCloseResponse,
};

/// 手动触发一轮过期作业关闭（与后台定时任务相同的幂等批处理）
pub async fn auto_close(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.auto_close_expired(chrono::Utc::now()).await {
        Ok(closed_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AutoCloseResponse { closed_count },
            "Expired assignments closed",
        ))),
        Err(e) => {
            tracing::error!("Failed to close expired assignments: {}", e);
            Ok(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to close expired assignments: {e}"),
            ))
        }
    }
}
