use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 软删除状态
// 数据库中是 nullable 的 deleted_at 时间戳，业务模型里收敛为带标签的状态，
// 读路径的过滤统一收在存储层（见 sea_orm_storage 中各实体的 live 查询）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/deletion.ts")]
pub enum Deletion {
    Active,
    Deleted { at: chrono::DateTime<chrono::Utc> },
}

impl Deletion {
    /// 从数据库的 nullable 时间戳转换
    pub fn from_timestamp(deleted_at: Option<i64>) -> Self {
        match deleted_at.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)) {
            Some(at) => Deletion::Deleted { at },
            None => Deletion::Active,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Deletion::Deleted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timestamp() {
        assert_eq!(Deletion::from_timestamp(None), Deletion::Active);
        assert!(Deletion::from_timestamp(Some(1735689600)).is_deleted());
    }
}
