use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::SubmissionStatus;

// 学习者仪表盘

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct LearnerCourseProgress {
    pub course_id: i64,
    pub course_title: String,
    pub total_assignments: i64,
    pub graded_count: i64,
    /// gradedCount / totalAssignments × 100，四舍五入
    pub completion_percent: i64,
}

/// 三天内到期的作业
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct UpcomingAssignment {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub course_id: i64,
    pub course_title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    /// 无提交行时为 null（虚状态 not_submitted）
    pub submission_status: Option<SubmissionStatus>,
}

/// 最近收到的评语
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentFeedback {
    pub submission_id: i64,
    pub assignment_title: String,
    pub course_title: String,
    pub score: Option<f64>,
    pub feedback: String,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

/// 跨课程的作业-提交状态平铺列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AssignmentStatusEntry {
    pub course_id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub submission_status: Option<SubmissionStatus>,
    pub is_late: Option<bool>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct LearnerDashboardResponse {
    pub courses: Vec<LearnerCourseProgress>,
    pub due_soon: Vec<UpcomingAssignment>,
    pub recent_feedback: Vec<RecentFeedback>,
    pub assignment_statuses: Vec<AssignmentStatusEntry>,
}

// 讲师仪表盘

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct InstructorCourseSummary {
    pub course_id: i64,
    pub course_title: String,
    pub enrollment_count: i64,
    pub assignment_count: i64,
}

/// 最近提交（解析了作业/课程/学生名）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentSubmission {
    pub submission_id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub course_title: String,
    pub student_name: String,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct InstructorDashboardResponse {
    pub courses: Vec<InstructorCourseSummary>,
    /// 名下所有作业中 status != graded 的提交数
    pub pending_grading_count: i64,
    pub recent_submissions: Vec<RecentSubmission>,
}

// 运营仪表盘：平台级总量

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct OperatorDashboardResponse {
    pub user_count: i64,
    pub course_count: i64,
    pub assignment_count: i64,
    pub submission_count: i64,
    pub active_enrollment_count: i64,
}
