use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo, normalize_page_size,
    enrollments::entities::EnrollmentStatus,
    submissions::{
        entities::{GradeAction, SubmissionStatus, Submission, SubmitMode, evaluate_submit},
        requests::{SubmissionListQuery, SubmitRequest},
        responses::{SubmissionListItem, SubmissionListResponse, SubmitterInfo},
    },
};
use crate::storage::{GradeOutcome, SubmitOutcome};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交 / 重交作业
    ///
    /// 事务内完成判定与落库：读取作业、选课资格和既有提交后交给
    /// `evaluate_submit` 判定，首次提交插入新行，重交在原行上更新
    /// （状态重置为 submitted，分数与评分时间清空）。
    pub async fn submit_assignment_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
        req: SubmitRequest,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<SubmitOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(assignment_model) = Assignments::find_by_id(assignment_id)
            .filter(AssignmentColumn::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(SubmitOutcome::AssignmentNotFound);
        };
        let assignment = assignment_model.into_assignment();

        let has_active_enrollment = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(assignment.course_id))
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?
            > 0;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        let existing_status = existing.as_ref().map(|m| {
            m.status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Submitted)
        });

        let decision = match evaluate_submit(&assignment, has_active_enrollment, existing_status, now)
        {
            Ok(decision) => decision,
            Err(rejection) => {
                txn.rollback().await.map_err(|e| {
                    LMSystemError::database_operation(format!("回滚事务失败: {e}"))
                })?;
                return Ok(SubmitOutcome::Rejected(rejection));
            }
        };

        let ts = now.timestamp();

        let submission = match decision.mode {
            SubmitMode::Create => {
                let model = ActiveModel {
                    assignment_id: Set(assignment_id),
                    user_id: Set(user_id),
                    content: Set(req.content),
                    link: Set(req.link),
                    status: Set(SubmissionStatus::Submitted.to_string()),
                    is_late: Set(decision.is_late),
                    submitted_at: Set(ts),
                    updated_at: Set(ts),
                    ..Default::default()
                };

                model
                    .insert(&txn)
                    .await
                    .map_err(|e| LMSystemError::database_operation(format!("提交作业失败: {e}")))?
            }
            SubmitMode::Replace => {
                // 唯一约束保证此处必有原行
                let model = existing
                    .ok_or_else(|| LMSystemError::not_found("提交记录不存在"))?;
                let mut active: ActiveModel = model.into();
                active.content = Set(req.content);
                active.link = Set(req.link);
                active.status = Set(SubmissionStatus::Submitted.to_string());
                active.is_late = Set(decision.is_late);
                active.score = Set(None);
                active.submitted_at = Set(ts);
                active.graded_at = Set(None);
                active.updated_at = Set(ts);

                active
                    .update(&txn)
                    .await
                    .map_err(|e| LMSystemError::database_operation(format!("重交作业失败: {e}")))?
            }
        };

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubmitOutcome::Accepted {
            submission: submission.into_submission(),
            decision,
        })
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 学生在某作业下的提交
    pub async fn get_submission_by_assignment_and_user_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出作业提交（附提交者信息）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = normalize_page_size(query.page, query.size);

        let mut select = Submissions::find().filter(Column::AssignmentId.eq(assignment_id));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = select
            .order_by_desc(Column::SubmittedAt)
            .find_also_related(crate::entity::users::Entity);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .filter_map(|(submission, user)| {
                user.map(|u| SubmissionListItem {
                    submission: submission.into_submission(),
                    submitter: SubmitterInfo {
                        id: u.id,
                        username: u.username,
                        display_name: u.display_name,
                    },
                })
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 评分 / 要求重交
    ///
    /// 带状态守卫的更新：UPDATE ... WHERE id = ? AND status = ?。
    /// 守卫未命中且行仍存在说明学生在读写之间重交了，返回 Conflict
    /// 让调用方以 409 拒绝，避免评分静默落在新提交上。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        expected_status: SubmissionStatus,
        action: GradeAction,
        score: Option<f64>,
        feedback: String,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<GradeOutcome> {
        let ts = now.timestamp();

        let (new_status, new_score, graded_at) = match action {
            GradeAction::Grade => (SubmissionStatus::Graded, score, Some(ts)),
            GradeAction::ResubmissionRequired => (SubmissionStatus::ResubmissionRequired, None, None),
        };

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(new_status.to_string()),
            )
            .col_expr(Column::Score, sea_orm::sea_query::Expr::value(new_score))
            .col_expr(
                Column::Feedback,
                sea_orm::sea_query::Expr::value(Some(feedback)),
            )
            .col_expr(Column::GradedAt, sea_orm::sea_query::Expr::value(graded_at))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(ts))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(expected_status.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("评分失败: {e}")))?;

        if result.rows_affected == 0 {
            // 区分行不存在与状态被并发修改
            return match self.get_submission_by_id_impl(submission_id).await? {
                None => Ok(GradeOutcome::NotFound),
                Some(_) => Ok(GradeOutcome::Conflict),
            };
        }

        let graded = self
            .get_submission_by_id_impl(submission_id)
            .await?
            .ok_or_else(|| LMSystemError::not_found("提交记录不存在"))?;

        Ok(GradeOutcome::Graded(graded))
    }
}
