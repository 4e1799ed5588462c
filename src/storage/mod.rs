use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus, TransitionRejection},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, UpdateCourseRequest},
        responses::{CourseDetailResponse, CourseListResponse},
    },
    dashboard::responses::{
        InstructorDashboardResponse, LearnerDashboardResponse, OperatorDashboardResponse,
    },
    enrollments::entities::Enrollment,
    enrollments::responses::EnrollmentListResponse,
    grades::{requests::GradeReportParams, responses::GradeReportResponse},
    submissions::{
        entities::{GradeAction, SubmitDecision, SubmitRejection, Submission},
        requests::{SubmissionListQuery, SubmitRequest},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::config::AppConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

/// 选课结果
#[derive(Debug)]
pub enum EnrollOutcome {
    /// 新建或重新激活了选课记录
    Enrolled(Enrollment),
    /// 已有活跃选课记录
    AlreadyEnrolled,
}

/// 创建 / 更新作业时的权重预算判定结果
#[derive(Debug)]
pub enum AssignmentWriteOutcome {
    Written(Assignment),
    NotFound,
    /// 超出课程权重预算，携带剩余可用权重
    BudgetExceeded { available: f64 },
}

/// 作业状态迁移结果
#[derive(Debug)]
pub enum StatusChangeOutcome {
    Changed(Assignment),
    NotFound,
    Rejected(TransitionRejection),
}

/// 提交结果
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted {
        submission: Submission,
        decision: SubmitDecision,
    },
    AssignmentNotFound,
    Rejected(SubmitRejection),
}

/// 评分结果
#[derive(Debug)]
pub enum GradeOutcome {
    Graded(Submission),
    NotFound,
    /// 带状态守卫的更新未命中任何行：提交状态在读写之间被并发修改
    Conflict,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已经是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(
        &self,
        owner_id: i64,
        title: String,
        description: Option<String>,
        category_id: Option<i64>,
        difficulty_id: Option<i64>,
    ) -> Result<Course>;
    // 通过ID获取课程（不含已删除）
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 课程详情（附派生的选课数 / 作业数）
    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetailResponse>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（软删除，打上删除标记）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学习者选课；已有取消记录时重新激活原行
    async fn enroll_user(&self, course_id: i64, user_id: i64) -> Result<EnrollOutcome>;
    // 退课（标记为 cancelled，保留历史）
    async fn unenroll_user(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 查询选课记录
    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>>;
    // 是否有活跃选课
    async fn has_active_enrollment(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 列出用户的选课（附课程摘要）
    async fn list_user_enrollments(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<EnrollmentListResponse>;

    /// 作业管理方法
    // 创建作业（事务内校验课程权重预算）
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome>;
    // 通过ID获取作业（不含已删除）
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程作业
    async fn list_assignments_with_pagination(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新作业（变更权重时重新校验预算）
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome>;
    // 作业状态迁移（事务内校验状态机与评分情况）
    async fn change_assignment_status(
        &self,
        assignment_id: i64,
        requested: AssignmentStatus,
    ) -> Result<StatusChangeOutcome>;
    // 删除作业（软删除）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 作业是否已有任何评分
    async fn has_graded_submissions(&self, assignment_id: i64) -> Result<bool>;
    // 批量关闭已过期的 published 作业（幂等），返回本次关闭的数量
    async fn auto_close_expired(&self, now: chrono::DateTime<chrono::Utc>) -> Result<u64>;

    /// 提交管理方法
    // 提交 / 重交作业（事务内判定，原地更新重交）
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        user_id: i64,
        req: SubmitRequest,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<SubmitOutcome>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 学生在某作业下的提交
    async fn get_submission_by_assignment_and_user(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业提交（讲师视角，附提交者信息）
    async fn list_submissions_with_pagination(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 评分 / 要求重交；带状态守卫的更新，并发冲突时返回 Conflict
    async fn grade_submission(
        &self,
        submission_id: i64,
        expected_status: crate::models::submissions::entities::SubmissionStatus,
        action: GradeAction,
        score: Option<f64>,
        feedback: String,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<GradeOutcome>;

    /// 成绩报告
    async fn grade_report(
        &self,
        user_id: i64,
        params: GradeReportParams,
    ) -> Result<GradeReportResponse>;

    /// 仪表盘聚合
    async fn learner_dashboard(
        &self,
        user_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<LearnerDashboardResponse>;
    async fn instructor_dashboard(&self, user_id: i64) -> Result<InstructorDashboardResponse>;
    async fn operator_dashboard(&self) -> Result<OperatorDashboardResponse>;
}

pub async fn create_storage(config: &AppConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
