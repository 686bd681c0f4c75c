use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// JSON body whose parse failures render as a 400 problem response
/// instead of actix's plain-text error.
///
/// The body size limit comes from the app's `web::PayloadConfig`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            let body = body.await.map_err(|e| {
                debug!(trace_id = %trace_ctx::trace_id(), path = %path, error = %e, "Unreadable request body");
                AppError::bad_request(ErrorCode::BadRequest, "Request body could not be read")
            })?;
            parse_body(&body).map(ValidatedJson)
        })
    }
}

/// Deserialize a request body, with a sanitized detail on failure.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body is required",
        ));
    }
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(
            trace_id = %trace_ctx::trace_id(),
            error = %Redacted(&e.to_string()),
            body_size = body.len(),
            "JSON body rejected"
        );
        AppError::bad_request(ErrorCode::BadRequest, classify(&e))
    })
}

fn classify(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        // Field names are safe to echo; values are not.
        Category::Data => match error.to_string().split(" at line").next() {
            Some(msg) if msg.starts_with("missing field") || msg.starts_with("unknown variant") => {
                format!("Invalid request: {msg}")
            }
            _ => "Invalid request: wrong types for one or more fields".to_string(),
        },
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
