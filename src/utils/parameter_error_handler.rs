//! 请求参数解析错误处理器
//!
//! 把 actix-web 默认的 JSON / Query 解析错误转换为统一的错误响应格式。

use actix_web::{HttpRequest, error::InternalError};

use crate::models::{ApiError, ErrorCode};

/// JSON 请求体解析错误处理器
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("请求体解析失败: {err}");
    let response = ApiError::new(ErrorCode::BadRequest, message).respond();
    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("查询参数解析失败: {err}");
    let response = ApiError::new(ErrorCode::BadRequest, message).respond();
    InternalError::from_response(err, response).into()
}
