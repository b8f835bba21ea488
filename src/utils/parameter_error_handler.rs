//! JSON 请求体与查询参数的解析错误处理
//!
//! 把 actix 默认的纯文本错误换成统一的 `ApiResponse` 格式。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid JSON payload: {err}");
    debug!("{} {}: {}", req.method(), req.path(), message);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    debug!("{} {}: {}", req.method(), req.path(), message);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}
