use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo, normalize_page_size,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, UpdateCourseRequest},
        responses::{CourseDetailResponse, CourseListItem, CourseListResponse},
    },
    enrollments::entities::EnrollmentStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

/// 课程的派生统计：活跃选课数与未删除作业数
async fn course_counts(db: &DatabaseConnection, course_id: i64) -> Result<(i64, i64)> {
    let enrollment_count = Enrollments::find()
        .filter(EnrollmentColumn::CourseId.eq(course_id))
        .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
        .count(db)
        .await
        .map_err(|e| LMSystemError::database_operation(format!("统计选课数失败: {e}")))?;

    let assignment_count = Assignments::find()
        .filter(AssignmentColumn::CourseId.eq(course_id))
        .filter(AssignmentColumn::DeletedAt.is_null())
        .count(db)
        .await
        .map_err(|e| LMSystemError::database_operation(format!("统计作业数失败: {e}")))?;

    Ok((enrollment_count as i64, assignment_count as i64))
}

impl SeaOrmStorage {
    /// 创建课程（初始为草稿状态）
    pub async fn create_course_impl(
        &self,
        owner_id: i64,
        title: String,
        description: Option<String>,
        category_id: Option<i64>,
        difficulty_id: Option<i64>,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title),
            description: Set(description),
            status: Set(CourseStatus::Draft.to_string()),
            category_id: Set(category_id),
            difficulty_id: Set(difficulty_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程（不含已删除）
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 课程详情（附派生统计）
    pub async fn get_course_detail_impl(
        &self,
        course_id: i64,
    ) -> Result<Option<CourseDetailResponse>> {
        let Some(course) = self.get_course_by_id_impl(course_id).await? else {
            return Ok(None);
        };

        let (enrollment_count, assignment_count) = course_counts(&self.db, course_id).await?;

        Ok(Some(CourseDetailResponse {
            course,
            enrollment_count,
            assignment_count,
        }))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = normalize_page_size(query.page, query.size);

        let mut select = Courses::find().filter(Column::DeletedAt.is_null());

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        // 分类筛选
        if let Some(category_id) = query.category_id {
            select = select.filter(Column::CategoryId.eq(category_id));
        }

        // 所有者筛选（讲师的"我的课程"，全部状态）
        if let Some(owner_id) = query.owner_id {
            select = select.filter(Column::OwnerId.eq(owner_id));
        }

        // 已选课程筛选（学习者的"我的课程"）
        if let Some(enrolled_user_id) = query.enrolled_user_id {
            let course_ids: Vec<i64> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::CourseId)
                .filter(EnrollmentColumn::UserId.eq(enrolled_user_id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询已选课程失败: {e}"))
                })?;
            select = select.filter(Column::Id.is_in(course_ids));
        }

        // 公共目录模式：仅已发布
        if query.published_only {
            select = select.filter(Column::Status.eq(CourseStatus::Published.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let mut items = Vec::with_capacity(courses.len());
        for model in courses {
            let course = model.into_course();
            let (enrollment_count, assignment_count) = course_counts(&self.db, course.id).await?;
            items.push(CourseListItem {
                course,
                enrollment_count,
                assignment_count,
            });
        }

        Ok(CourseListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(category_id) = update.category_id {
            model.category_id = Set(Some(category_id));
        }

        if let Some(difficulty_id) = update.difficulty_id {
            model.difficulty_id = Set(Some(difficulty_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程（软删除，保留行并打上删除时间戳）
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Courses::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(course_id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
