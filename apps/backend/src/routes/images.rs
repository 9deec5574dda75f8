use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use tracing::debug;

use crate::auth::roles::AllowSet;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::extractors::Caller;
use crate::services::ImageService;
use crate::state::app_state::AppState;
use crate::storage::validate_key;

const UPLOAD: AllowSet = AllowSet::Admin;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const FILE_FIELD: &str = "file";

fn multipart_err(e: impl std::fmt::Display) -> AppError {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid multipart body: {e}"))
}

/// Pull the bytes of the `file` field out of a multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<BytesMut, AppError> {
    while let Some(mut field) = multipart.try_next().await.map_err(multipart_err)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let mut data = BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_err)? {
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::payload_too_large(format!(
                    "Upload exceeds {MAX_UPLOAD_BYTES} bytes"
                )));
            }
            data.extend_from_slice(&chunk);
        }
        return Ok(data);
    }
    Err(AppError::from(DomainError::validation(
        "Multipart field 'file' is required.",
    )))
}

async fn upload_image(
    caller: Caller,
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    caller.require(UPLOAD)?;
    let raw = read_file_field(Multipart::new(req.headers(), payload)).await?;
    debug!(size = raw.len(), "image upload received");

    let keys = ImageService
        .upload(state.blobs.as_ref(), raw.freeze())
        .await?;
    Ok(HttpResponse::Ok().json(keys))
}

async fn get_image(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    if validate_key(&key).is_err() {
        return Err(AppError::not_found(
            ErrorCode::ImageNotFound,
            format!("Image '{key}' not found."),
        ));
    }
    let blob = ImageService.fetch(state.blobs.as_ref(), &key).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, blob.content_type))
        .body(blob.bytes))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/image", web::post().to(upload_image))
        .route("/image/{key}", web::get().to(get_image));
}
