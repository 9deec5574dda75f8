use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest JSON body accepted by [`ValidatedJson`].
pub const MAX_JSON_BODY: usize = 256 * 1024;

/// JSON body extractor with problem-details errors.
///
/// Malformed JSON is a 400; well-formed JSON that does not fit the target
/// type (missing field, wrong type) is a 422.
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
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Failed to read request body".to_string(),
                    )
                })?;
                if body.len() + chunk.len() > MAX_JSON_BODY {
                    return Err(AppError::payload_too_large(format!(
                        "Request body exceeds {MAX_JSON_BODY} bytes"
                    )));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_id,
                        error = %Redacted(&e.to_string()),
                        content_type = %content_type,
                        body_size = body.len(),
                        "JSON parsing failed"
                    );
                    classify_json_error(&e)
                })
        })
    }
}

fn classify_json_error(error: &JsonError) -> AppError {
    match error.classify() {
        Category::Syntax => AppError::bad_request(
            ErrorCode::BadRequest,
            format!("Invalid JSON at line {}", error.line()),
        ),
        Category::Eof => AppError::bad_request(
            ErrorCode::BadRequest,
            "Invalid JSON: unexpected end of input".to_string(),
        ),
        Category::Data => AppError::invalid(ErrorCode::ValidationError, strip_position(error)),
        Category::Io => AppError::bad_request(
            ErrorCode::BadRequest,
            "Invalid JSON: I/O error while reading body".to_string(),
        ),
    }
}

/// serde_json appends " at line X column Y"; drop it.
fn strip_position(error: &JsonError) -> String {
    let msg = error.to_string();
    match msg.rfind(" at line ") {
        Some(idx) => msg[..idx].to_string(),
        None => msg,
    }
}
