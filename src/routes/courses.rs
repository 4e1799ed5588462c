use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{AssignmentListParams, CreateAssignmentRequest};
use crate::models::courses::requests::{
    CourseListParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, CourseService, EnrollmentService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeIDI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(course_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

pub async fn enroll(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(course_id.0, &req).await
}

pub async fn unenroll(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(course_id.0, &req).await
}

pub async fn create_assignment(
    req: HttpRequest,
    course_id: SafeIDI64,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(course_id.0, assignment_data.into_inner(), &req)
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    course_id: SafeIDI64,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(course_id.0, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 课程目录 - 业务层按角色过滤可见性
                    .route(web::get().to(list_courses))
                    // 创建课程 - 仅讲师和运营
                    .route(web::post().to(create_course).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    )),
            )
            .service(
                web::resource("/{id}")
                    // 课程详情 - 未发布课程的可见性在业务层校验
                    .route(web::get().to(get_course))
                    // 更新/删除 - 课程所有者校验在业务层
                    .route(web::put().to(update_course).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    ))
                    .route(web::delete().to(delete_course).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    )),
            )
            .service(
                web::resource("/{id}/enroll")
                    .route(web::post().to(enroll))
                    .route(web::delete().to(unenroll)),
            )
            .service(
                web::resource("/{id}/assignments")
                    // 作业列表 - 业务层对非管理者隐藏草稿
                    .route(web::get().to(list_assignments))
                    // 布置作业 - 仅讲师和运营，所有权在业务层校验
                    .route(web::post().to(create_assignment).wrap(
                        middlewares::RequireRole::new_any(UserRole::instructor_roles()),
                    )),
            ),
    );
}
