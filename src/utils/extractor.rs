//! 路径参数提取器
//!
//! 对路径中的 ID 做安全解析，解析失败时返回统一的错误响应而不是框架默认的 404。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiError, ErrorCode};

/// 从路径 `{id}` 段解析 i64 的提取器
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_path_i64(req, "id").map(SafeIDI64))
    }
}

fn parse_path_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        let response = ApiError::new(
            ErrorCode::BadRequest,
            format!("路径参数 {name} 必须是有效的整数"),
        )
        .respond();
        InternalError::from_response("invalid path parameter", response).into()
    })
}
