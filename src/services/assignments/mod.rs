pub mod auto_close;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;
pub mod submissions;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode, error_response,
    assignments::entities::Assignment,
    assignments::requests::{
        AssignmentListParams, ChangeAssignmentStatusRequest, CreateAssignmentRequest,
        UpdateAssignmentRequest,
    },
    submissions::requests::{SubmissionListParams, SubmitRequest},
    users::entities::User,
};
use crate::services::courses::can_manage_course;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 加载作业并校验当前用户的管理权限（课程所有者或运营）
///
/// 返回 Err 时携带已构建好的错误响应，调用方直接返回即可。
pub(crate) async fn require_manageable_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    user: &User,
) -> Result<Assignment, HttpResponse> {
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Err(error_response(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve assignment: {}", e);
            return Err(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assignment: {e}"),
            ));
        }
    };

    let course = match storage.get_course_by_id(assignment.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(error_response(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to retrieve course: {}", e);
            return Err(error_response(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course: {e}"),
            ));
        }
    };

    if !can_manage_course(user, &course) {
        return Err(error_response(
            ErrorCode::InsufficientPermissions,
            "Only the course owner or an operator can manage this assignment",
        ));
    }

    Ok(assignment)
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 在课程下创建作业
    pub async fn create_assignment(
        &self,
        course_id: i64,
        assignment_data: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, course_id, assignment_data, request).await
    }

    // 课程作业列表
    pub async fn list_assignments(
        &self,
        course_id: i64,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, course_id, query, request).await
    }

    // 作业详情（学习者视角附本人提交摘要）
    pub async fn get_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, assignment_id, request).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, assignment_id, update_data, request).await
    }

    // 作业状态迁移
    pub async fn change_status(
        &self,
        assignment_id: i64,
        status_data: ChangeAssignmentStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::change_status(self, assignment_id, status_data, request).await
    }

    // 删除作业（软删除）
    pub async fn delete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, assignment_id, request).await
    }

    // 提交 / 重交作业
    pub async fn submit(
        &self,
        assignment_id: i64,
        submit_data: SubmitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, assignment_id, submit_data, request).await
    }

    // 作业提交列表（讲师视角）
    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        query: SubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, assignment_id, query, request).await
    }

    // 手动触发过期作业关闭（运营）
    pub async fn auto_close(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        auto_close::auto_close(self, request).await
    }
}
