use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的成功响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

// 统一的错误响应结构：{ "error": { "code", "message", "details?" } }
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiError {
    pub error: ErrorBody,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// 根据错误码推导 HTTP 状态码并构建响应
    pub fn respond(&self) -> HttpResponse {
        HttpResponse::build(self.error.code.status()).json(self)
    }
}

/// 构建错误响应的便捷函数
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    ApiError::new(code, message).respond()
}

/// 携带字段级详情的错误响应
pub fn error_response_with_details(
    code: ErrorCode,
    message: impl Into<String>,
    details: Value,
) -> HttpResponse {
    ApiError::with_details(code, message, details).respond()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::with_details(
            ErrorCode::WeightBudgetExceeded,
            "超出课程权重预算",
            serde_json::json!({ "availableWeight": 0.5 }),
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"]["code"], "WEIGHT_BUDGET_EXCEEDED");
        assert_eq!(json["error"]["details"]["availableWeight"], 0.5);
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let err = ApiError::new(ErrorCode::AssignmentNotFound, "作业不存在");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json["error"].get("details").is_none());
    }
}
