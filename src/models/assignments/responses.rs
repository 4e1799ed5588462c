use serde::Serialize;
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::common::pagination::PaginationInfo;
use crate::models::submissions::entities::SubmissionStatus;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

/// 学习者视角的作业详情：附本人提交摘要
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_submission: Option<MySubmissionSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct MySubmissionSummary {
    pub id: i64,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub score: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// 自动关闭批处理结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AutoCloseResponse {
    pub closed_count: u64,
}
