use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::Deletion;

/// 权重求和的浮点容差
pub const WEIGHT_EPSILON: f64 = 1e-6;

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Draft,     // 草稿，学习者不可见
    Published, // 已发布，截止前可提交
    Closed,    // 已关闭，不再接受提交，已有提交仍可评分
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, published, closed"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "draft"),
            AssignmentStatus::Published => write!(f, "published"),
            AssignmentStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "published" => Ok(AssignmentStatus::Published),
            "closed" => Ok(AssignmentStatus::Closed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

/// 状态迁移被拒绝的原因
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionRejection {
    /// 状态机不存在这条边
    Unreachable {
        current: AssignmentStatus,
        requested: AssignmentStatus,
    },
    /// closed 的作业一旦开始评分便不可重新打开
    GradingStarted {
        current: AssignmentStatus,
        requested: AssignmentStatus,
    },
}

impl AssignmentStatus {
    /// 作业状态机的唯一迁移函数
    ///
    /// 允许的边：draft ↔ published、published → closed、draft → closed。
    /// closed → draft/published 仅在尚无任何已评分提交时允许。
    pub fn validate_transition(
        current: AssignmentStatus,
        requested: AssignmentStatus,
        has_graded_submissions: bool,
    ) -> Result<(), TransitionRejection> {
        use AssignmentStatus::*;
        match (current, requested) {
            (Draft, Published) | (Published, Draft) | (Published, Closed) | (Draft, Closed) => {
                Ok(())
            }
            (Closed, Draft) | (Closed, Published) => {
                if has_graded_submissions {
                    Err(TransitionRejection::GradingStarted { current, requested })
                } else {
                    Ok(())
                }
            }
            _ => Err(TransitionRejection::Unreachable { current, requested }),
        }
    }
}

/// 权重预算校验
///
/// `existing_total` 为同一课程内其他未删除作业的权重之和。
/// 超出预算时返回剩余可用权重，供错误详情展示 "X% available"。
pub fn check_weight_budget(existing_total: f64, candidate: f64) -> Result<(), f64> {
    if existing_total + candidate > 1.0 + WEIGHT_EPSILON {
        Err((1.0 - existing_total).max(0.0))
    } else {
        Ok(())
    }
}

/// 单个权重值的合法区间校验
pub fn validate_points_weight(weight: f64) -> bool {
    (0.0..=1.0).contains(&weight) && weight.is_finite()
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    /// 占课程总成绩的比例（0.0–1.0）
    pub points_weight: f64,
    pub status: AssignmentStatus,
    pub allow_late: bool,
    pub allow_resubmission: bool,
    pub created_by: i64,
    pub deletion: Deletion,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 截止时间是否已过
    pub fn is_past_due(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssignmentStatus::*;

    #[test]
    fn test_forward_transitions_allowed() {
        for (from, to) in [
            (Draft, Published),
            (Published, Draft),
            (Published, Closed),
            (Draft, Closed),
        ] {
            assert!(AssignmentStatus::validate_transition(from, to, true).is_ok());
        }
    }

    #[test]
    fn test_self_transition_unreachable() {
        for s in [Draft, Published, Closed] {
            assert_eq!(
                AssignmentStatus::validate_transition(s, s, false),
                Err(TransitionRejection::Unreachable {
                    current: s,
                    requested: s
                })
            );
        }
    }

    #[test]
    fn test_reopen_closed_before_grading() {
        assert!(AssignmentStatus::validate_transition(Closed, Published, false).is_ok());
        assert!(AssignmentStatus::validate_transition(Closed, Draft, false).is_ok());
    }

    #[test]
    fn test_reopen_closed_after_grading_rejected() {
        assert_eq!(
            AssignmentStatus::validate_transition(Closed, Published, true),
            Err(TransitionRejection::GradingStarted {
                current: Closed,
                requested: Published
            })
        );
        assert_eq!(
            AssignmentStatus::validate_transition(Closed, Draft, true),
            Err(TransitionRejection::GradingStarted {
                current: Closed,
                requested: Draft
            })
        );
    }

    #[test]
    fn test_weight_budget_accepts_exact_fill() {
        // 三个 20% 之后还允许 80%，不做归一化
        assert!(check_weight_budget(0.2, 0.8).is_ok());
        // 浮点累加误差在容差内
        assert!(check_weight_budget(0.1 + 0.2 + 0.3, 0.4).is_ok());
    }

    #[test]
    fn test_weight_budget_reports_available() {
        // 已有 0.5，尝试加入 0.6，剩余预算 0.5
        let available = check_weight_budget(0.5, 0.6).unwrap_err();
        assert!((available - 0.5).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn test_weight_budget_available_never_negative() {
        let available = check_weight_budget(1.0, 0.3).unwrap_err();
        assert_eq!(available, 0.0);
    }

    #[test]
    fn test_validate_points_weight() {
        assert!(validate_points_weight(0.0));
        assert!(validate_points_weight(1.0));
        assert!(validate_points_weight(0.35));
        assert!(!validate_points_weight(-0.1));
        assert!(!validate_points_weight(1.1));
        assert!(!validate_points_weight(f64::NAN));
    }
}
