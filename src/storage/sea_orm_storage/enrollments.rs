use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo, normalize_page_size,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        responses::{EnrollmentListItem, EnrollmentListResponse},
    },
};
use crate::storage::EnrollOutcome;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学习者选课
    ///
    /// (course_id, user_id) 上有唯一约束：曾经退课的用户再次选课时
    /// 重新激活原有记录，而不是插入新行。
    pub async fn enroll_user_impl(&self, course_id: i64, user_id: i64) -> Result<EnrollOutcome> {
        let now = chrono::Utc::now().timestamp();

        let existing = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        match existing {
            Some(model) if model.status == EnrollmentStatus::Active.to_string() => {
                Ok(EnrollOutcome::AlreadyEnrolled)
            }
            Some(model) => {
                // 重新激活取消状态的记录
                let id = model.id;
                let mut active: ActiveModel = model.into();
                active.status = Set(EnrollmentStatus::Active.to_string());
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| {
                        LMSystemError::database_operation(format!("重新激活选课记录失败: {e}"))
                    })?;

                let reactivated = Enrollments::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        LMSystemError::database_operation(format!("查询选课记录失败: {e}"))
                    })?
                    .ok_or_else(|| LMSystemError::not_found("选课记录不存在"))?;
                Ok(EnrollOutcome::Enrolled(reactivated.into_enrollment()))
            }
            None => {
                let model = ActiveModel {
                    course_id: Set(course_id),
                    user_id: Set(user_id),
                    status: Set(EnrollmentStatus::Active.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let result = model
                    .insert(&self.db)
                    .await
                    .map_err(|e| LMSystemError::database_operation(format!("选课失败: {e}")))?;

                Ok(EnrollOutcome::Enrolled(result.into_enrollment()))
            }
        }
    }

    /// 退课（状态置为 cancelled，保留历史提交）
    pub async fn unenroll_user_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Enrollments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(EnrollmentStatus::Cancelled.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询选课记录
    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 是否有活跃选课
    pub async fn has_active_enrollment_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let count = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出用户的活跃选课（附课程摘要）
    pub async fn list_user_enrollments_impl(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = normalize_page_size(Some(page), Some(size));

        let select = Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .order_by_desc(Column::CreatedAt)
            .find_also_related(crate::entity::courses::Entity);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|c| {
                    let course = c.into_course();
                    EnrollmentListItem {
                        enrollment: enrollment.into_enrollment(),
                        course_title: course.title,
                        course_status: course.status,
                    }
                })
            })
            .collect();

        Ok(EnrollmentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
