use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::assignments::requests::{
    ChangeAssignmentStatusRequest, UpdateAssignmentRequest,
};
use crate::models::submissions::requests::{SubmissionListParams, SubmitRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(assignment_id.0, &req).await
}

pub async fn update_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(assignment_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn change_status(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    status_data: web::Json<ChangeAssignmentStatusRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .change_status(assignment_id.0, status_data.into_inner(), &req)
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(assignment_id.0, &req)
        .await
}

pub async fn submit(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    submit_data: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit(assignment_id.0, submit_data.into_inner(), &req)
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    assignment_id: SafeIDI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_submissions(assignment_id.0, query.into_inner(), &req)
        .await
}

pub async fn auto_close(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.auto_close(&req).await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            // 固定路径要先于 /{id} 注册
            .service(
                web::resource("/auto-close")
                    .wrap(middlewares::RequireRole::new_any(UserRole::operator_roles()))
                    .route(web::post().to(auto_close)),
            )
            .service(
                web::resource("/{id}")
                    // 作业详情 - 草稿可见性在业务层校验
                    .route(web::get().to(get_assignment))
                    // 更新/删除 - 仅讲师和运营，所有权在业务层校验
                    .route(web::put().to(update_assignment).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    ))
                    .route(web::delete().to(delete_assignment).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    )),
            )
            .service(
                web::resource("/{id}/status").route(web::put().to(change_status).wrap(
                    middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                )),
            )
            .service(
                web::resource("/{id}/submit")
                    .wrap(RateLimit::submit())
                    .route(web::post().to(submit)),
            )
            .service(
                web::resource("/{id}/submissions").route(web::get().to(list_submissions).wrap(
                    middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                )),
            ),
    );
}
