use crate::helper::response_helpers::{envelope, method_not_allowed, parse_json_body, ApiError};
use crate::helper::upload_helpers::{
    build_upload_result, estimate_file_size, is_allowed_type, UploadRequest, ALLOWED_MIME_TYPES, UPLOAD_ID_PREFIX,
};
use crate::middleware::CorsHeaders;
use crate::AppState;
use actix_web::{http::StatusCode, web, HttpResponse};
use chrono::Utc;
use serde_json::json;

pub const UPLOAD_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];

pub fn config_upload(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/upload")
            .wrap(CorsHeaders::new(UPLOAD_METHODS))
            .route(web::get().to(upload_status))
            .route(web::post().to(upload_file))
            .default_service(web::to(|| async { method_not_allowed(UPLOAD_METHODS) })),
    );
}

async fn upload_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Upload service is running",
        "supportedTypes": ALLOWED_MIME_TYPES,
        "maxSize": format!("{}MB", state.max_upload_bytes / (1024 * 1024)),
        "timestamp": Utc::now(),
    }))
}

async fn upload_file(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let request: UploadRequest = parse_json_body(&body)?;

    let (file_data, file_name) = match (
        request.file_data.as_deref().filter(|d| !d.is_empty()),
        request.file_name.as_deref().filter(|n| !n.trim().is_empty()),
    ) {
        (Some(data), Some(name)) => (data, name),
        _ => {
            return Err(ApiError::validation_with(
                "Missing file data or file name",
                json!({ "required": ["fileData", "fileName"] }),
            ))
        }
    };

    // A blank type counts as absent and falls back to image/jpeg.
    let file_type = request.file_type.as_deref().filter(|t| !t.trim().is_empty());
    if let Some(file_type) = file_type {
        if !is_allowed_type(file_type) {
            return Err(ApiError::validation_with(
                "Unsupported file type",
                json!({ "allowedTypes": ALLOWED_MIME_TYPES }),
            ));
        }
    }

    let file_size = estimate_file_size(file_data);
    if file_size > state.max_upload_bytes {
        return Err(ApiError::validation_with(
            "File too large",
            json!({ "maxSize": state.max_upload_bytes, "fileSize": file_size }),
        ));
    }

    // Guard dropped before the simulated latency.
    let file_id = state.write_store().generate_id(UPLOAD_ID_PREFIX, Utc::now());
    if !state.upload_latency.is_zero() {
        actix_web::rt::time::sleep(state.upload_latency).await;
    }

    log::info!("Simulated upload of '{}' ({} bytes) as {}", file_name, file_size, file_id);
    let result = build_upload_result(file_id, file_name, file_type, file_size);
    Ok(envelope(StatusCode::OK, result, Some("File uploaded successfully")))
}
