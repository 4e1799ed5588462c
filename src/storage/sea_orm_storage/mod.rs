//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod dashboard;
mod enrollments;
mod grades;
mod submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async(config: &AppConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LMSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LMSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus},
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
        entities::{GradeAction, SubmissionStatus, Submission},
        requests::{SubmissionListQuery, SubmitRequest},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::{
    AssignmentWriteOutcome, EnrollOutcome, GradeOutcome, StatusChangeOutcome, Storage,
    SubmitOutcome,
};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 课程模块
    async fn create_course(
        &self,
        owner_id: i64,
        title: String,
        description: Option<String>,
        category_id: Option<i64>,
        difficulty_id: Option<i64>,
    ) -> Result<Course> {
        self.create_course_impl(owner_id, title, description, category_id, difficulty_id)
            .await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetailResponse>> {
        self.get_course_detail_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_user(&self, course_id: i64, user_id: i64) -> Result<EnrollOutcome> {
        self.enroll_user_impl(course_id, user_id).await
    }

    async fn unenroll_user(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.unenroll_user_impl(course_id, user_id).await
    }

    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, user_id).await
    }

    async fn has_active_enrollment(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.has_active_enrollment_impl(course_id, user_id).await
    }

    async fn list_user_enrollments(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<EnrollmentListResponse> {
        self.list_user_enrollments_impl(user_id, page, size).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome> {
        self.create_assignment_impl(course_id, created_by, req)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(course_id, query)
            .await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn change_assignment_status(
        &self,
        assignment_id: i64,
        requested: AssignmentStatus,
    ) -> Result<StatusChangeOutcome> {
        self.change_assignment_status_impl(assignment_id, requested)
            .await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn has_graded_submissions(&self, assignment_id: i64) -> Result<bool> {
        self.has_graded_submissions_impl(assignment_id).await
    }

    async fn auto_close_expired(&self, now: chrono::DateTime<chrono::Utc>) -> Result<u64> {
        self.auto_close_expired_impl(now).await
    }

    // 提交模块
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        user_id: i64,
        req: SubmitRequest,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<SubmitOutcome> {
        self.submit_assignment_impl(assignment_id, user_id, req, now)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_user(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_user_impl(assignment_id, user_id)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(assignment_id, query)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        expected_status: SubmissionStatus,
        action: GradeAction,
        score: Option<f64>,
        feedback: String,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<GradeOutcome> {
        self.grade_submission_impl(submission_id, expected_status, action, score, feedback, now)
            .await
    }

    // 成绩模块
    async fn grade_report(
        &self,
        user_id: i64,
        params: GradeReportParams,
    ) -> Result<GradeReportResponse> {
        self.grade_report_impl(user_id, params).await
    }

    // 仪表盘模块
    async fn learner_dashboard(
        &self,
        user_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<LearnerDashboardResponse> {
        self.learner_dashboard_impl(user_id, now).await
    }

    async fn instructor_dashboard(&self, user_id: i64) -> Result<InstructorDashboardResponse> {
        self.instructor_dashboard_impl(user_id).await
    }

    async fn operator_dashboard(&self) -> Result<OperatorDashboardResponse> {
        self.operator_dashboard_impl().await
    }
}
