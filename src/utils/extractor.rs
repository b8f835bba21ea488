//! 路径参数提取器
//!
//! 在进入业务逻辑前校验路径中的 ID，非法时直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_identifier;

fn bad_path_param(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn extract_path_id(req: &HttpRequest, param: &str) -> Result<String, actix_web::Error> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| bad_path_param(format!("Missing path parameter: {param}")))?;
    validate_identifier(param, raw).map_err(bad_path_param)?;
    Ok(raw.to_string())
}

macro_rules! define_safe_path_id {
    ($name:ident, $param:literal) => {
        #[doc = concat!("经过校验的路径参数 `{", $param, "}`")]
        #[derive(Debug, Clone)]
        pub struct $name(pub String);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(extract_path_id(req, $param).map($name))
            }
        }
    };
}

define_safe_path_id!(SafeLessonId, "lesson_id");
define_safe_path_id!(SafeScheduleId, "schedule_id");
