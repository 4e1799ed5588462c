//! 存储层集成测试（内存 SQLite）

use chrono::{Duration, Utc};

use super::SeaOrmStorage;
use crate::models::{
    assignments::entities::{Assignment, AssignmentStatus},
    assignments::requests::CreateAssignmentRequest,
    submissions::entities::{GradeAction, SubmissionStatus, SubmitMode},
    submissions::requests::SubmitRequest,
    users::entities::{User, UserRole},
    users::requests::CreateUserRequest,
};
use crate::storage::{EnrollOutcome, AssignmentWriteOutcome, GradeOutcome, StatusChangeOutcome, SubmitOutcome};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

async fn memory_storage() -> SeaOrmStorage {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmStorage { db }
}

async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user_impl(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "hashed-password".to_string(),
            role,
            display_name: None,
            avatar_url: None,
        })
        .await
        .unwrap()
}

async fn seed_assignment(
    storage: &SeaOrmStorage,
    course_id: i64,
    created_by: i64,
    due_date: chrono::DateTime<Utc>,
    allow_late: bool,
) -> Assignment {
    let outcome = storage
        .create_assignment_impl(
            course_id,
            created_by,
            CreateAssignmentRequest {
                title: "Essay".to_string(),
                description: None,
                due_date,
                points_weight: 0.3,
                allow_late: Some(allow_late),
                allow_resubmission: Some(false),
            },
        )
        .await
        .unwrap();
    let AssignmentWriteOutcome::Written(assignment) = outcome else {
        panic!("assignment creation rejected: {outcome:?}");
    };

    let published = storage
        .change_assignment_status_impl(assignment.id, AssignmentStatus::Published)
        .await
        .unwrap();
    let StatusChangeOutcome::Changed(assignment) = published else {
        panic!("publish rejected: {published:?}");
    };
    assignment
}

#[tokio::test]
async fn test_auto_close_expired_is_idempotent() {
    let storage = memory_storage().await;
    let instructor = seed_user(&storage, "instructor", UserRole::Instructor).await;
    let course = storage
        .create_course_impl(instructor.id, "Rust".to_string(), None, None, None)
        .await
        .unwrap();

    let now = Utc::now();
    let expired = seed_assignment(&storage, course.id, instructor.id, now - Duration::days(1), false).await;
    // 允许迟交的过期作业不在自动关闭范围内
    let late_ok = seed_assignment(&storage, course.id, instructor.id, now - Duration::days(1), true).await;

    assert_eq!(storage.auto_close_expired_impl(now).await.unwrap(), 1);

    let closed = storage
        .get_assignment_by_id_impl(expired.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status, AssignmentStatus::Closed);

    let still_open = storage
        .get_assignment_by_id_impl(late_ok.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_open.status, AssignmentStatus::Published);

    // 第二次运行没有新的可关闭作业
    assert_eq!(storage.auto_close_expired_impl(now).await.unwrap(), 0);
}

#[tokio::test]
async fn test_resubmission_updates_row_in_place() {
    let storage = memory_storage().await;
    let instructor = seed_user(&storage, "instructor", UserRole::Instructor).await;
    let learner = seed_user(&storage, "learner", UserRole::Learner).await;
    let course = storage
        .create_course_impl(instructor.id, "Rust".to_string(), None, None, None)
        .await
        .unwrap();

    let now = Utc::now();
    let assignment =
        seed_assignment(&storage, course.id, instructor.id, now + Duration::days(7), false).await;

    let enrolled = storage.enroll_user_impl(course.id, learner.id).await.unwrap();
    assert!(matches!(enrolled, EnrollOutcome::Enrolled(_)));

    // 首次提交
    let first = storage
        .submit_assignment_impl(
            assignment.id,
            learner.id,
            SubmitRequest {
                content: "first draft".to_string(),
                link: None,
            },
            now,
        )
        .await
        .unwrap();
    let SubmitOutcome::Accepted {
        submission: first,
        decision,
    } = first
    else {
        panic!("first submit rejected: {first:?}");
    };
    assert_eq!(decision.mode, SubmitMode::Create);
    assert!(!first.is_late);

    // 要求重交
    let graded = storage
        .grade_submission_impl(
            first.id,
            SubmissionStatus::Submitted,
            GradeAction::ResubmissionRequired,
            None,
            "Please expand section 2".to_string(),
            now,
        )
        .await
        .unwrap();
    let GradeOutcome::Graded(returned) = graded else {
        panic!("grading failed: {graded:?}");
    };
    assert_eq!(returned.status, SubmissionStatus::ResubmissionRequired);
    assert_eq!(returned.score, None);

    // 重交：同一行原地更新，不新建记录
    let second = storage
        .submit_assignment_impl(
            assignment.id,
            learner.id,
            SubmitRequest {
                content: "second draft".to_string(),
                link: None,
            },
            now,
        )
        .await
        .unwrap();
    let SubmitOutcome::Accepted {
        submission: second,
        decision,
    } = second
    else {
        panic!("resubmit rejected: {second:?}");
    };
    assert_eq!(decision.mode, SubmitMode::Replace);
    assert_eq!(second.id, first.id);
    assert_eq!(second.status, SubmissionStatus::Submitted);
    assert_eq!(second.score, None);
    assert_eq!(second.graded_at, None);
    assert_eq!(second.content, "second draft");
}
