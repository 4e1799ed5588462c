use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单页条数上限，超过按上限截断
pub const MAX_PAGE_SIZE: i64 = 100;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

impl PaginationQuery {
    /// 归一化为存储层可直接使用的 (page, size)
    pub fn normalized(&self) -> (u64, u64) {
        normalize_page_size(Some(self.page), Some(self.size))
    }
}

/// 归一化分页参数：page 至少为 1，size 截断到 [1, MAX_PAGE_SIZE]
///
/// 列表查询的 page/size 都经过这里，存储层不再各自处理缺省值和越界值。
pub fn normalize_page_size(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1) as u64;
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    /// 由归一化后的分页参数和 paginator 统计结果构造
    pub fn new(page: u64, size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        assert_eq!(normalize_page_size(None, None), (1, 10));
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        assert_eq!(normalize_page_size(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_page_size(Some(-5), Some(-5)), (1, 1));
        assert_eq!(normalize_page_size(Some(3), Some(1000)), (3, 100));
    }

    #[test]
    fn test_query_normalized() {
        let query = PaginationQuery { page: -1, size: 500 };
        assert_eq!(query.normalized(), (1, 100));
    }

    #[test]
    fn test_deserialize_accepts_string_numbers() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page": "2", "size": "25"}"#).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 25);
    }
}
