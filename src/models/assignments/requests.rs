use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assignments::entities::AssignmentStatus;
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求（POST /api/courses/{id}/assignments）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    /// 占课程总成绩的比例（0.0–1.0）
    pub points_weight: f64,
    pub allow_late: Option<bool>,
    pub allow_resubmission: Option<bool>,
}

/// 更新作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub points_weight: Option<f64>,
    pub allow_late: Option<bool>,
    pub allow_resubmission: Option<bool>,
}

/// 状态迁移请求（PUT /api/assignments/{id}/status）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct ChangeAssignmentStatusRequest {
    pub status: AssignmentStatus,
}

/// 课程作业列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AssignmentStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<AssignmentStatus>,
    /// 学习者视角：过滤掉草稿
    pub exclude_draft: bool,
}
