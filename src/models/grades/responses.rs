use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::SubmissionStatus;

/// 单个作业的成绩行：原始分数和作业自身权重，不做预乘，
/// 加权只发生在课程总评一级。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AssignmentGradeEntry {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub points_weight: f64,
    pub submission_status: Option<SubmissionStatus>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 单门课程的成绩报告
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseGradeReport {
    pub course_id: i64,
    pub course_title: String,
    /// 加权总评；没有任何已评分作业时为 null（而不是 0）
    pub total_score: Option<f64>,
    pub graded_count: i64,
    pub assignments_count: i64,
    pub assignments: Vec<AssignmentGradeEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeReportResponse {
    pub courses: Vec<CourseGradeReport>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
