use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::entity::users::Entity as Users;
use crate::errors::{LMSystemError, Result};
use crate::models::{
    assignments::entities::AssignmentStatus,
    dashboard::responses::{
        AssignmentStatusEntry, InstructorCourseSummary, InstructorDashboardResponse,
        LearnerCourseProgress, LearnerDashboardResponse, OperatorDashboardResponse,
        RecentFeedback, RecentSubmission, UpcomingAssignment,
    },
    enrollments::entities::EnrollmentStatus,
    grades::compute::completion_percent,
    submissions::entities::SubmissionStatus,
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

/// "即将到期"的时间窗口：三天
const DUE_SOON_WINDOW_SECS: i64 = 3 * 24 * 3600;

impl SeaOrmStorage {
    /// 学习者仪表盘
    ///
    /// 范围是用户活跃选课内未删除课程的非草稿作业：
    /// 每门课的完成度、三天内到期的作业、最近五条评语、
    /// 以及跨课程的作业-提交状态平铺列表。
    pub async fn learner_dashboard_impl(
        &self,
        user_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<LearnerDashboardResponse> {
        let course_ids: Vec<i64> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::CourseId)
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids.clone()))
            .filter(CourseColumn::DeletedAt.is_null())
            .order_by_desc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let course_titles: HashMap<i64, String> =
            courses.iter().map(|c| (c.id, c.title.clone())).collect();

        // 选课范围内的全部非草稿作业，一次取回后在内存中按课程分组
        let assignments = Assignments::find()
            .filter(AssignmentColumn::CourseId.is_in(course_ids))
            .filter(AssignmentColumn::DeletedAt.is_null())
            .filter(AssignmentColumn::Status.ne(AssignmentStatus::Draft.to_string()))
            .order_by_asc(AssignmentColumn::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        let assignment_ids: Vec<i64> = assignments.iter().map(|m| m.id).collect();

        let submissions: HashMap<i64, _> = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .filter(SubmissionColumn::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交记录失败: {e}")))?
            .into_iter()
            .map(|m| (m.assignment_id, m.into_submission()))
            .collect();

        let mut per_course: HashMap<i64, (i64, i64)> = HashMap::new();
        let mut due_soon = Vec::new();
        let mut assignment_statuses = Vec::with_capacity(assignments.len());

        let now_ts = now.timestamp();

        for model in assignments {
            let assignment = model.into_assignment();
            let submission = submissions.get(&assignment.id);
            let status = submission.map(|s| s.status);

            let counts = per_course.entry(assignment.course_id).or_insert((0, 0));
            counts.0 += 1;
            if status == Some(SubmissionStatus::Graded) {
                counts.1 += 1;
            }

            let due_ts = assignment.due_date.timestamp();
            if due_ts >= now_ts && due_ts <= now_ts + DUE_SOON_WINDOW_SECS {
                due_soon.push(UpcomingAssignment {
                    assignment_id: assignment.id,
                    assignment_title: assignment.title.clone(),
                    course_id: assignment.course_id,
                    course_title: course_titles
                        .get(&assignment.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    due_date: assignment.due_date,
                    submission_status: status,
                });
            }

            assignment_statuses.push(AssignmentStatusEntry {
                course_id: assignment.course_id,
                assignment_id: assignment.id,
                assignment_title: assignment.title,
                due_date: assignment.due_date,
                submission_status: status,
                is_late: submission.map(|s| s.is_late),
            });
        }

        let course_progress = courses
            .into_iter()
            .map(|c| {
                let (total, graded) = per_course.get(&c.id).copied().unwrap_or((0, 0));
                LearnerCourseProgress {
                    course_id: c.id,
                    course_title: c.title,
                    total_assignments: total,
                    graded_count: graded,
                    completion_percent: completion_percent(graded, total),
                }
            })
            .collect();

        // 最近五条评语：已评分且有评语的提交，按评分时间倒序
        let mut recent_feedback: Vec<RecentFeedback> = submissions
            .values()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .filter_map(|s| {
                let feedback = s.feedback.clone().filter(|f| !f.is_empty())?;
                let graded_at = s.graded_at?;
                let entry = assignment_statuses
                    .iter()
                    .find(|a| a.assignment_id == s.assignment_id)?;
                Some(RecentFeedback {
                    submission_id: s.id,
                    assignment_title: entry.assignment_title.clone(),
                    course_title: course_titles
                        .get(&entry.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    score: s.score,
                    feedback,
                    graded_at,
                })
            })
            .collect();
        recent_feedback.sort_by(|a, b| b.graded_at.cmp(&a.graded_at));
        recent_feedback.truncate(5);

        Ok(LearnerDashboardResponse {
            courses: course_progress,
            due_soon,
            recent_feedback,
            assignment_statuses,
        })
    }

    /// 讲师仪表盘：名下课程摘要、待评分总数和最近十条提交
    pub async fn instructor_dashboard_impl(
        &self,
        user_id: i64,
    ) -> Result<InstructorDashboardResponse> {
        let courses = Courses::find()
            .filter(CourseColumn::OwnerId.eq(user_id))
            .filter(CourseColumn::DeletedAt.is_null())
            .order_by_desc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        let course_titles: HashMap<i64, String> =
            courses.iter().map(|c| (c.id, c.title.clone())).collect();

        let mut summaries = Vec::with_capacity(courses.len());
        for course in &courses {
            let enrollment_count = Enrollments::find()
                .filter(EnrollmentColumn::CourseId.eq(course.id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("统计选课数失败: {e}"))
                })?;

            let assignment_count = Assignments::find()
                .filter(AssignmentColumn::CourseId.eq(course.id))
                .filter(AssignmentColumn::DeletedAt.is_null())
                .count(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("统计作业数失败: {e}"))
                })?;

            summaries.push(InstructorCourseSummary {
                course_id: course.id,
                course_title: course.title.clone(),
                enrollment_count: enrollment_count as i64,
                assignment_count: assignment_count as i64,
            });
        }

        let assignments = Assignments::find()
            .filter(AssignmentColumn::CourseId.is_in(course_ids))
            .filter(AssignmentColumn::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        let assignment_index: HashMap<i64, (String, i64)> = assignments
            .iter()
            .map(|a| (a.id, (a.title.clone(), a.course_id)))
            .collect();
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        let pending_grading_count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
            .filter(SubmissionColumn::Status.ne(SubmissionStatus::Graded.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计待评分数失败: {e}")))?;

        let recent = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .limit(10)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询最近提交失败: {e}")))?;

        let recent_submissions = recent
            .into_iter()
            .filter_map(|(model, user)| {
                let submission = model.into_submission();
                let (assignment_title, course_id) =
                    assignment_index.get(&submission.assignment_id)?.clone();
                let student_name = user
                    .map(|u| u.display_name.unwrap_or(u.username))
                    .unwrap_or_default();
                Some(RecentSubmission {
                    submission_id: submission.id,
                    assignment_id: submission.assignment_id,
                    assignment_title,
                    course_title: course_titles.get(&course_id).cloned().unwrap_or_default(),
                    student_name,
                    status: submission.status,
                    is_late: submission.is_late,
                    submitted_at: submission.submitted_at,
                })
            })
            .collect();

        Ok(InstructorDashboardResponse {
            courses: summaries,
            pending_grading_count: pending_grading_count as i64,
            recent_submissions,
        })
    }

    /// 运营仪表盘：平台级总量统计
    pub async fn operator_dashboard_impl(&self) -> Result<OperatorDashboardResponse> {
        let user_count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计用户数失败: {e}")))?;

        let course_count = Courses::find()
            .filter(CourseColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计课程数失败: {e}")))?;

        let assignment_count = Assignments::find()
            .filter(AssignmentColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计作业数失败: {e}")))?;

        let submission_count = Submissions::find()
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计提交数失败: {e}")))?;

        let active_enrollment_count = Enrollments::find()
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计选课数失败: {e}")))?;

        Ok(OperatorDashboardResponse {
            user_count: user_count as i64,
            course_count: course_count as i64,
            assignment_count: assignment_count as i64,
            submission_count: submission_count as i64,
            active_enrollment_count: active_enrollment_count as i64,
        })
    }
}
