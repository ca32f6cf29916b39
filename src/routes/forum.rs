use crate::helper::response_helpers::{envelope, method_not_allowed, ok, parse_json_body, require_id, ApiError};
use crate::middleware::CorsHeaders;
use crate::models::db_operations::posts_db_operations;
use crate::models::{NewPost, PostPatch, PostQuery};
use crate::routes::IdQuery;
use crate::AppState;
use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

pub const FORUM_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "OPTIONS"];

/// PUT body: either `{ "action": "like" }` or a partial post.
#[derive(Deserialize, Default)]
struct UpdatePostBody {
    action: Option<String>,
    #[serde(flatten)]
    patch: PostPatch,
}

pub fn config_forum(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/forum")
            .wrap(CorsHeaders::new(FORUM_METHODS))
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post))
            .route(web::put().to(update_post))
            .route(web::delete().to(delete_post))
            .default_service(web::to(|| async { method_not_allowed(FORUM_METHODS) })),
    );
}

async fn list_posts(state: web::Data<AppState>, query: web::Query<PostQuery>) -> HttpResponse {
    let page = posts_db_operations::read_post_page(&mut state.write_store(), &query);
    ok(page)
}

async fn create_post(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let new_post: NewPost = parse_json_body(&body)?;

    let missing = new_post.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields {
            missing,
            required: &NewPost::REQUIRED_FIELDS,
        });
    }

    let post = posts_db_operations::create_post(&mut state.write_store(), new_post);
    Ok(envelope(StatusCode::CREATED, post, Some("Post published successfully")))
}

async fn update_post(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let post_id = require_id(&query.id, "post")?;
    let UpdatePostBody { action, patch } = parse_json_body(&body)?;

    let mut store = state.write_store();
    if action.as_deref() == Some("like") {
        let post = posts_db_operations::like_post(&mut store, post_id)?;
        return Ok(envelope(StatusCode::OK, post, Some("Post liked")));
    }

    let post = posts_db_operations::update_post(&mut store, post_id, patch)?;
    Ok(envelope(StatusCode::OK, post, Some("Post updated successfully")))
}

async fn delete_post(state: web::Data<AppState>, query: web::Query<IdQuery>) -> Result<HttpResponse, ApiError> {
    let post_id = require_id(&query.id, "post")?;
    let deleted = posts_db_operations::delete_post(&mut state.write_store(), post_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post deleted successfully",
        "deletedId": deleted.id,
        "data": deleted,
    })))
}
