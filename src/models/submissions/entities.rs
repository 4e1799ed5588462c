use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::{Assignment, AssignmentStatus};

// 提交状态
// 状态机：not_submitted（虚状态，无行）→ submitted → graded
//                                    └→ resubmission_required → submitted …
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
    ResubmissionRequired,
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, graded, resubmission_required"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::ResubmissionRequired => write!(f, "resubmission_required"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            "resubmission_required" => Ok(SubmissionStatus::ResubmissionRequired),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
// (assignment_id, user_id) 上有唯一约束：重交在原行上更新。
// 不变式：score 非空 当且仅当 status == graded。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    pub content: String,
    pub link: Option<String>,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 提交落库方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitMode {
    /// 首次提交，插入新行
    Create,
    /// 重交，在原行上更新（状态重置为 submitted，graded_at 清空）
    Replace,
}

/// 提交被接受时的判定结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmitDecision {
    pub mode: SubmitMode,
    pub is_late: bool,
}

/// 提交被拒绝的原因
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRejection {
    /// 没有该课程的活跃选课记录
    NotEnrolled,
    /// 作业不处于 published 状态
    AssignmentNotOpen { status: AssignmentStatus },
    /// 截止已过且不允许迟交
    PastDueDate,
    /// 已有 submitted/graded 提交且作业不允许重交
    AlreadyExists { status: SubmissionStatus },
}

/// 提交动作的唯一判定函数
///
/// 对 (选课资格, 作业状态, 截止时间, 既有提交状态) 做完整匹配：
/// - 作业必须 published 且有活跃选课；
/// - 截止已过时仅 allow_late 的作业接受提交并标记 is_late；
/// - 无既有行为首次提交；resubmission_required 下的重交始终允许；
///   submitted/graded 上的覆盖仅在 allow_resubmission 时走原地更新。
/// 每次被接受的提交都按当前时刻重新计算 is_late。
pub fn evaluate_submit(
    assignment: &Assignment,
    has_active_enrollment: bool,
    existing: Option<SubmissionStatus>,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<SubmitDecision, SubmitRejection> {
    if !has_active_enrollment {
        return Err(SubmitRejection::NotEnrolled);
    }

    if assignment.status != AssignmentStatus::Published {
        return Err(SubmitRejection::AssignmentNotOpen {
            status: assignment.status,
        });
    }

    let past_due = assignment.is_past_due(now);
    if past_due && !assignment.allow_late {
        return Err(SubmitRejection::PastDueDate);
    }

    let mode = match existing {
        None => SubmitMode::Create,
        Some(SubmissionStatus::ResubmissionRequired) => SubmitMode::Replace,
        Some(status @ (SubmissionStatus::Submitted | SubmissionStatus::Graded)) => {
            if assignment.allow_resubmission {
                SubmitMode::Replace
            } else {
                return Err(SubmitRejection::AlreadyExists { status });
            }
        }
    };

    Ok(SubmitDecision {
        mode,
        is_late: past_due,
    })
}

// 评分动作
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum GradeAction {
    /// 评分：需要 [0,100] 的分数和非空反馈
    Grade,
    /// 要求重交：需要非空反馈，分数清空
    ResubmissionRequired,
}

impl<'de> Deserialize<'de> for GradeAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "grade" => Ok(GradeAction::Grade),
            "resubmission_required" => Ok(GradeAction::ResubmissionRequired),
            _ => Err(serde::de::Error::custom(format!(
                "无效的评分动作: '{s}'. 支持的动作: grade, resubmission_required"
            ))),
        }
    }
}

/// 评分请求被拒绝的原因
#[derive(Debug, Clone, PartialEq)]
pub enum GradeRejection {
    MissingFeedback,
    InvalidScoreRange,
}

/// 评分动作校验
///
/// 重复评分是允许的（覆盖既有分数与反馈），这里只校验载荷本身。
pub fn validate_grade_action(
    action: GradeAction,
    score: Option<f64>,
    feedback: &str,
) -> Result<(), GradeRejection> {
    if feedback.trim().is_empty() {
        return Err(GradeRejection::MissingFeedback);
    }
    if action == GradeAction::Grade {
        match score {
            Some(s) if (0.0..=100.0).contains(&s) && s.is_finite() => {}
            _ => return Err(GradeRejection::InvalidScoreRange),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deletion;
    use chrono::{Duration, Utc};

    fn assignment(
        status: AssignmentStatus,
        due_in: Duration,
        allow_late: bool,
        allow_resubmission: bool,
    ) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            course_id: 1,
            title: "第一次作业".to_string(),
            description: None,
            due_date: now + due_in,
            points_weight: 0.3,
            status,
            allow_late,
            allow_resubmission,
            created_by: 10,
            deletion: Deletion::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_first_submit_before_due() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(1), false, false);
        let decision = evaluate_submit(&a, true, None, Utc::now()).unwrap();
        assert_eq!(decision.mode, SubmitMode::Create);
        assert!(!decision.is_late);
    }

    #[test]
    fn test_submit_requires_enrollment() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(1), false, false);
        assert_eq!(
            evaluate_submit(&a, false, None, Utc::now()),
            Err(SubmitRejection::NotEnrolled)
        );
    }

    #[test]
    fn test_submit_to_unpublished_rejected() {
        for status in [AssignmentStatus::Draft, AssignmentStatus::Closed] {
            let a = assignment(status, Duration::hours(1), true, true);
            assert_eq!(
                evaluate_submit(&a, true, None, Utc::now()),
                Err(SubmitRejection::AssignmentNotOpen { status })
            );
        }
    }

    #[test]
    fn test_past_due_without_allow_late_rejected() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(-1), false, false);
        assert_eq!(
            evaluate_submit(&a, true, None, Utc::now()),
            Err(SubmitRejection::PastDueDate)
        );
    }

    #[test]
    fn test_past_due_with_allow_late_marks_late() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(-1), true, false);
        let decision = evaluate_submit(&a, true, None, Utc::now()).unwrap();
        assert_eq!(decision.mode, SubmitMode::Create);
        assert!(decision.is_late);
    }

    #[test]
    fn test_duplicate_submit_without_resubmission_rejected() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(1), false, false);
        for status in [SubmissionStatus::Submitted, SubmissionStatus::Graded] {
            assert_eq!(
                evaluate_submit(&a, true, Some(status), Utc::now()),
                Err(SubmitRejection::AlreadyExists { status })
            );
        }
    }

    #[test]
    fn test_duplicate_submit_with_resubmission_replaces() {
        let a = assignment(AssignmentStatus::Published, Duration::hours(1), false, true);
        let decision =
            evaluate_submit(&a, true, Some(SubmissionStatus::Graded), Utc::now()).unwrap();
        assert_eq!(decision.mode, SubmitMode::Replace);
    }

    #[test]
    fn test_resubmission_required_always_replaceable() {
        // 讲师已要求重交时，即使作业本身不允许覆盖也走更新路径
        let a = assignment(AssignmentStatus::Published, Duration::hours(1), false, false);
        let decision = evaluate_submit(
            &a,
            true,
            Some(SubmissionStatus::ResubmissionRequired),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(decision.mode, SubmitMode::Replace);
    }

    #[test]
    fn test_resubmission_recomputes_late_flag() {
        // 要求重交后截止已过：allow_late 的作业接受并标记迟交
        let a = assignment(AssignmentStatus::Published, Duration::hours(-1), true, false);
        let decision = evaluate_submit(
            &a,
            true,
            Some(SubmissionStatus::ResubmissionRequired),
            Utc::now(),
        )
        .unwrap();
        assert!(decision.is_late);
    }

    #[test]
    fn test_grade_action_requires_feedback() {
        assert_eq!(
            validate_grade_action(GradeAction::Grade, Some(90.0), "  "),
            Err(GradeRejection::MissingFeedback)
        );
        assert_eq!(
            validate_grade_action(GradeAction::ResubmissionRequired, None, ""),
            Err(GradeRejection::MissingFeedback)
        );
    }

    #[test]
    fn test_grade_action_score_range() {
        assert_eq!(
            validate_grade_action(GradeAction::Grade, Some(101.0), "good"),
            Err(GradeRejection::InvalidScoreRange)
        );
        assert_eq!(
            validate_grade_action(GradeAction::Grade, Some(-1.0), "good"),
            Err(GradeRejection::InvalidScoreRange)
        );
        assert_eq!(
            validate_grade_action(GradeAction::Grade, None, "good"),
            Err(GradeRejection::InvalidScoreRange)
        );
        assert!(validate_grade_action(GradeAction::Grade, Some(0.0), "zero but graded").is_ok());
        assert!(validate_grade_action(GradeAction::Grade, Some(100.0), "perfect").is_ok());
    }

    #[test]
    fn test_resubmission_request_ignores_score() {
        assert!(
            validate_grade_action(GradeAction::ResubmissionRequired, None, "Please revise").is_ok()
        );
    }
}
