use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::GradeRequest;
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(submission_id.0, &req).await
}

pub async fn grade(
    req: HttpRequest,
    submission_id: SafeIDI64,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade(submission_id.0, grade_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/submissions")
            .wrap(middlewares::RequireJWT)
            // 提交详情 - 提交者本人或课程管理者，业务层校验
            .route("/{id}", web::get().to(get_submission))
            .service(
                web::resource("/{id}/grade").route(web::put().to(grade).wrap(
                    middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                )),
            ),
    );
}
