use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::courses::entities::CourseStatus;

/// 创建课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub difficulty_id: Option<i64>,
    /// 运营可代指定课程所有者（讲师），讲师创建时忽略
    pub owner_id: Option<i64>,
}

/// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<CourseStatus>,
    pub category_id: Option<i64>,
    pub difficulty_id: Option<i64>,
}

/// 课程列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub category_id: Option<i64>,
    /// mine=true 返回自己的课程（讲师：全部状态；学习者：已选课程）
    pub mine: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub category_id: Option<i64>,
    /// 仅返回该所有者的课程（全部状态）
    pub owner_id: Option<i64>,
    /// 仅返回该用户已选的课程
    pub enrolled_user_id: Option<i64>,
    /// 公共目录模式：仅已发布课程
    pub published_only: bool,
}
