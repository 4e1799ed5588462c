use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo, normalize_page_size,
    assignments::{
        entities::{Assignment, AssignmentStatus, check_weight_budget},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    submissions::entities::SubmissionStatus,
};
use crate::storage::{AssignmentWriteOutcome, StatusChangeOutcome};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

/// 课程内其他未删除作业的权重之和
async fn sum_other_weights<C: ConnectionTrait>(
    db: &C,
    course_id: i64,
    exclude_id: Option<i64>,
) -> Result<f64> {
    let mut select = Assignments::find()
        .select_only()
        .column(Column::PointsWeight)
        .filter(Column::CourseId.eq(course_id))
        .filter(Column::DeletedAt.is_null());

    if let Some(id) = exclude_id {
        select = select.filter(Column::Id.ne(id));
    }

    let weights: Vec<f64> = select
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| LMSystemError::database_operation(format!("查询课程权重失败: {e}")))?;

    Ok(weights.iter().sum())
}

impl SeaOrmStorage {
    /// 创建作业
    ///
    /// 在事务内校验课程权重预算：已有权重之和加上新权重不得超过 1.0（含容差）。
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let existing_total = sum_other_weights(&txn, course_id, None).await?;
        if let Err(available) = check_weight_budget(existing_total, req.points_weight) {
            txn.rollback()
                .await
                .map_err(|e| LMSystemError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(AssignmentWriteOutcome::BudgetExceeded { available });
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            points_weight: Set(req.points_weight),
            status: Set(AssignmentStatus::Draft.to_string()),
            allow_late: Set(req.allow_late.unwrap_or(false)),
            allow_resubmission: Set(req.allow_resubmission.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(AssignmentWriteOutcome::Written(result.into_assignment()))
    }

    /// 通过 ID 获取作业（不含已删除）
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出课程作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = normalize_page_size(query.page, query.size);

        let mut select = Assignments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::DeletedAt.is_null());

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 学习者视角不展示草稿
        if query.exclude_draft {
            select = select.filter(Column::Status.ne(AssignmentStatus::Draft.to_string()));
        }

        select = select.order_by_asc(Column::DueDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新作业
    ///
    /// 变更权重时在事务内重新校验预算（排除自身旧权重）。
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<AssignmentWriteOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Assignments::find_by_id(assignment_id)
            .filter(Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(AssignmentWriteOutcome::NotFound);
        };

        if let Some(new_weight) = update.points_weight {
            let other_total =
                sum_other_weights(&txn, existing.course_id, Some(assignment_id)).await?;
            if let Err(available) = check_weight_budget(other_total, new_weight) {
                txn.rollback().await.map_err(|e| {
                    LMSystemError::database_operation(format!("回滚事务失败: {e}"))
                })?;
                return Ok(AssignmentWriteOutcome::BudgetExceeded { available });
            }
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        if let Some(points_weight) = update.points_weight {
            model.points_weight = Set(points_weight);
        }

        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        if let Some(allow_resubmission) = update.allow_resubmission {
            model.allow_resubmission = Set(allow_resubmission);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(AssignmentWriteOutcome::Written(updated.into_assignment()))
    }

    /// 作业状态迁移
    ///
    /// 事务内读取当前状态与评分情况，经状态机校验后做带状态守卫的更新。
    /// 守卫未命中说明读写之间状态被并发修改，返回状态冲突错误。
    pub async fn change_assignment_status_impl(
        &self,
        assignment_id: i64,
        requested: AssignmentStatus,
    ) -> Result<StatusChangeOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Assignments::find_by_id(assignment_id)
            .filter(Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(StatusChangeOutcome::NotFound);
        };

        let current = existing
            .status
            .parse::<AssignmentStatus>()
            .unwrap_or(AssignmentStatus::Draft);

        let has_graded = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::Graded.to_string()))
            .count(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询评分情况失败: {e}")))?
            > 0;

        if let Err(rejection) = AssignmentStatus::validate_transition(current, requested, has_graded)
        {
            txn.rollback()
                .await
                .map_err(|e| LMSystemError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(StatusChangeOutcome::Rejected(rejection));
        }

        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(requested.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::Status.eq(current.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新作业状态失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| LMSystemError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(LMSystemError::state_conflict(format!(
                "作业 {assignment_id} 状态已被并发修改"
            )));
        }

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        let changed = self
            .get_assignment_by_id_impl(assignment_id)
            .await?
            .ok_or_else(|| LMSystemError::not_found("作业不存在"))?;

        Ok(StatusChangeOutcome::Changed(changed))
    }

    /// 删除作业（软删除）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 作业是否已有任何评分
    pub async fn has_graded_submissions_impl(&self, assignment_id: i64) -> Result<bool> {
        let count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::Graded.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询评分情况失败: {e}")))?;

        Ok(count > 0)
    }

    /// 批量关闭已过期的 published 作业
    ///
    /// 只关闭不允许迟交的作业；允许迟交的作业过期后仍接受提交。
    /// 单条 UPDATE 天然幂等：已 closed 的行不再命中条件。
    pub async fn auto_close_expired_impl(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        let ts = now.timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(AssignmentStatus::Closed.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(ts))
            .filter(Column::Status.eq(AssignmentStatus::Published.to_string()))
            .filter(Column::DueDate.lt(ts))
            .filter(Column::AllowLate.eq(false))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("自动关闭作业失败: {e}")))?;

        if result.rows_affected > 0 {
            info!("Auto-closed {} expired assignments", result.rows_affected);
        }

        Ok(result.rows_affected)
    }
}
