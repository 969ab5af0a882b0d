use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径中的 `{id}` 参数
///
/// 非数字或非正数一律按资源不存在处理（404），而不是参数错误。
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => Err(InternalError::from_response(
                "invalid id",
                HttpResponse::NotFound()
                    .json(ApiResponse::error_empty(ErrorCode::NotFound, "Not found.")),
            )
            .into()),
        })
    }
}
