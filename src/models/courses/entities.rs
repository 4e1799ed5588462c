use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::Deletion;

// 课程状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,     // 草稿，仅所有者可见
    Published, // 已发布，可被选课
    Archived,  // 已归档
}

impl<'de> Deserialize<'de> for CourseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程状态: '{s}'. 支持的状态: draft, published, archived"
            ))
        })
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Draft => write!(f, "draft"),
            CourseStatus::Published => write!(f, "published"),
            CourseStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CourseStatus::Draft),
            "published" => Ok(CourseStatus::Published),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(format!("Invalid course status: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub category_id: Option<i64>,
    pub difficulty_id: Option<i64>,
    pub deletion: Deletion,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 课程详情对 user_id 是否可见（已发布对所有人可见，否则仅所有者）
    pub fn visible_to(&self, user_id: i64, is_operator: bool) -> bool {
        self.status == CourseStatus::Published || self.owner_id == user_id || is_operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(status: CourseStatus, owner_id: i64) -> Course {
        Course {
            id: 1,
            owner_id,
            title: "Rust 入门".to_string(),
            description: None,
            status,
            category_id: None,
            difficulty_id: None,
            deletion: Deletion::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_published_course_visible_to_everyone() {
        assert!(course(CourseStatus::Published, 1).visible_to(99, false));
    }

    #[test]
    fn test_draft_course_only_visible_to_owner_or_operator() {
        let c = course(CourseStatus::Draft, 1);
        assert!(c.visible_to(1, false));
        assert!(c.visible_to(99, true));
        assert!(!c.visible_to(99, false));
    }
}
