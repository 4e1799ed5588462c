use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn learner_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.learner(&req).await
}

pub async fn instructor_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.instructor(&req).await
}

pub async fn operator_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.operator(&req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("/learner", web::get().to(learner_dashboard))
            .service(
                web::resource("/instructor")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .route(web::get().to(instructor_dashboard)),
            )
            .service(
                web::resource("/operator")
                    .wrap(middlewares::RequireRole::new_any(UserRole::operator_roles()))
                    .route(web::get().to(operator_dashboard)),
            ),
    );
}
