use crate::helper::response_helpers::{envelope, method_not_allowed, ok, ApiError};
use crate::middleware::CorsHeaders;
use crate::models::db_operations::admin_db_operations;
use crate::AppState;
use actix_web::{http::Method, http::StatusCode, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

pub const ADMIN_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];

#[derive(Deserialize)]
pub struct AdminQuery {
    action: Option<String>,
    confirm: Option<String>,
}

pub fn config_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin")
            .wrap(CorsHeaders::new(ADMIN_METHODS))
            .route(web::get().to(admin_action))
            .route(web::post().to(admin_action))
            .default_service(web::to(|| async { method_not_allowed(ADMIN_METHODS) })),
    );
}

async fn admin_action(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<AdminQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    match query.action.as_deref() {
        Some("stats") => Ok(ok(admin_db_operations::detailed_stats(&state.read_store()))),
        Some("export") => Ok(envelope(
            StatusCode::OK,
            admin_db_operations::export_data(&state.read_store()),
            Some("Data exported successfully"),
        )),
        Some("import") => import_action(req.method(), &state, &body),
        Some("reset") => reset_action(&state, query.confirm.as_deref()),
        _ => Ok(admin_info(&state)),
    }
}

fn admin_info(state: &AppState) -> HttpResponse {
    let overview = admin_db_operations::overview(&state.read_store());
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Animal rescue admin API",
        "endpoints": {
            "stats": "/api/admin?action=stats - statistics",
            "export": "/api/admin?action=export - export all data",
            "import": "/api/admin?action=import - import data (POST)",
            "reset": "/api/admin?action=reset&confirm=yes - reset to seed data",
        },
        "dataStore": overview,
        "timestamp": Utc::now(),
    }))
}

fn import_action(method: &Method, state: &AppState, body: &[u8]) -> Result<HttpResponse, ApiError> {
    if method != Method::POST {
        return Err(ApiError::method_not_allowed("Importing data requires POST", ADMIN_METHODS));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::validation_with("Invalid import data", json!({ "message": e.to_string() })))?;
    if !value.is_object() {
        return Err(ApiError::validation("Invalid import data"));
    }

    // Decoded in full before the store is touched.
    let payload = admin_db_operations::parse_import_payload(value)?;
    let summary = admin_db_operations::import_data(&mut state.write_store(), payload);
    Ok(envelope(StatusCode::OK, summary, Some("Data imported successfully")))
}

fn reset_action(state: &AppState, confirm: Option<&str>) -> Result<HttpResponse, ApiError> {
    if confirm != Some("yes") {
        return Err(ApiError::validation_with(
            "Reset must be confirmed",
            json!({ "message": "Add ?action=reset&confirm=yes to confirm the reset" }),
        ));
    }

    let summary = admin_db_operations::reset_data(&mut state.write_store());
    Ok(envelope(StatusCode::OK, summary, Some("Data reset to initial state")))
}
