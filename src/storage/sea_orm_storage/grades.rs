use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    assignments::entities::AssignmentStatus,
    common::pagination::MAX_PAGE_SIZE,
    enrollments::entities::EnrollmentStatus,
    grades::{
        compute::{GradedItem, graded_count, weighted_total},
        requests::GradeReportParams,
        responses::{AssignmentGradeEntry, CourseGradeReport, GradeReportResponse},
    },
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 学习者成绩单：按课程聚合的加权成绩
    ///
    /// 范围是用户活跃选课内的课程；每门课取未删除且非草稿的作业，
    /// 逐项给出原始分数与权重，总评由 `weighted_total` 计算，
    /// 没有任何已评分作业的课程总评为 null。
    pub async fn grade_report_impl(
        &self,
        user_id: i64,
        params: GradeReportParams,
    ) -> Result<GradeReportResponse> {
        let limit = params.limit.clamp(1, MAX_PAGE_SIZE) as u64;
        let offset = params.offset.max(0) as u64;

        // 活跃选课的课程 ID
        let mut enrolled = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::CourseId)
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()));

        if let Some(course_id) = params.course_id {
            enrolled = enrolled.filter(EnrollmentColumn::CourseId.eq(course_id));
        }

        let course_ids: Vec<i64> = enrolled
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        let base = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids.clone()))
            .filter(CourseColumn::DeletedAt.is_null());

        let total = base
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程总数失败: {e}")))?;

        let courses = base
            .order_by_desc(CourseColumn::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let mut reports = Vec::with_capacity(courses.len());

        for course_model in courses {
            let course = course_model.into_course();

            // 草稿作业对学习者不可见，也不参与总评
            let assignment_models = Assignments::find()
                .filter(AssignmentColumn::CourseId.eq(course.id))
                .filter(AssignmentColumn::DeletedAt.is_null())
                .filter(AssignmentColumn::Status.ne(AssignmentStatus::Draft.to_string()))
                .order_by_asc(AssignmentColumn::DueDate)
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询作业列表失败: {e}"))
                })?;

            let assignment_ids: Vec<i64> = assignment_models.iter().map(|m| m.id).collect();

            let submissions: HashMap<i64, _> = Submissions::find()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
                .filter(SubmissionColumn::UserId.eq(user_id))
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询提交记录失败: {e}"))
                })?
                .into_iter()
                .map(|m| (m.assignment_id, m.into_submission()))
                .collect();

            let mut entries = Vec::with_capacity(assignment_models.len());
            let mut items = Vec::with_capacity(assignment_models.len());

            for model in assignment_models {
                let assignment = model.into_assignment();
                let submission = submissions.get(&assignment.id);

                // score 非空当且仅当 status == graded
                items.push(GradedItem {
                    points_weight: assignment.points_weight,
                    score: submission.and_then(|s| s.score),
                });

                entries.push(AssignmentGradeEntry {
                    assignment_id: assignment.id,
                    assignment_title: assignment.title,
                    points_weight: assignment.points_weight,
                    submission_status: submission.map(|s| s.status),
                    score: submission.and_then(|s| s.score),
                    feedback: submission.and_then(|s| s.feedback.clone()),
                    graded_at: submission.and_then(|s| s.graded_at),
                });
            }

            reports.push(CourseGradeReport {
                course_id: course.id,
                course_title: course.title,
                total_score: weighted_total(&items),
                graded_count: graded_count(&items),
                assignments_count: entries.len() as i64,
                assignments: entries,
            });
        }

        Ok(GradeReportResponse {
            courses: reports,
            total: total as i64,
            limit: limit as i64,
            offset: offset as i64,
        })
    }
}
