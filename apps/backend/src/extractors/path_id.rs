use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// The `{id}` path segment parsed as a UUID; malformed ids are a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Uuid);

pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}")))
}

impl FromRequest for PathId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            Some(raw) => parse_id(raw).map(PathId),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidId,
                "Missing id parameter",
            )),
        };
        ready(result)
    }
}
