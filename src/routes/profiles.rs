use crate::helper::response_helpers::{envelope, method_not_allowed, ok, parse_json_body, require_id, ApiError};
use crate::middleware::CorsHeaders;
use crate::models::db_operations::profiles_db_operations;
use crate::models::{NewProfile, ProfilePatch, ProfileQuery};
use crate::routes::IdQuery;
use crate::AppState;
use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

pub const PROFILE_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "OPTIONS"];

pub fn config_profiles(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profiles")
            .wrap(CorsHeaders::new(PROFILE_METHODS))
            .route(web::get().to(list_profiles))
            .route(web::post().to(create_profile))
            .route(web::put().to(update_profile))
            .route(web::delete().to(delete_profile))
            .default_service(web::to(|| async { method_not_allowed(PROFILE_METHODS) })),
    );
}

async fn list_profiles(state: web::Data<AppState>, query: web::Query<ProfileQuery>) -> HttpResponse {
    let page = profiles_db_operations::read_profile_page(&mut state.write_store(), &query);
    ok(page)
}

async fn create_profile(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let new_profile: NewProfile = parse_json_body(&body)?;

    let missing = new_profile.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields {
            missing,
            required: &NewProfile::REQUIRED_FIELDS,
        });
    }

    let profile = profiles_db_operations::create_profile(&mut state.write_store(), new_profile);
    Ok(envelope(StatusCode::CREATED, profile, Some("Profile created successfully")))
}

async fn update_profile(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let profile_id = require_id(&query.id, "profile")?;
    let patch: ProfilePatch = parse_json_body(&body)?;

    let profile = profiles_db_operations::update_profile(&mut state.write_store(), profile_id, patch)?;
    Ok(envelope(StatusCode::OK, profile, Some("Profile updated successfully")))
}

async fn delete_profile(state: web::Data<AppState>, query: web::Query<IdQuery>) -> Result<HttpResponse, ApiError> {
    let profile_id = require_id(&query.id, "profile")?;
    let deleted = profiles_db_operations::delete_profile(&mut state.write_store(), profile_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile deleted successfully",
        "deletedId": deleted.id,
        "data": deleted,
    })))
}
