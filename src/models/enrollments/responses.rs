use serde::Serialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::courses::entities::CourseStatus;
use crate::models::enrollments::entities::Enrollment;

/// 选课条目（附课程摘要）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub enrollment: Enrollment,
    pub course_title: String,
    pub course_status: CourseStatus,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListResponse {
    pub items: Vec<EnrollmentListItem>,
    pub pagination: PaginationInfo,
}
