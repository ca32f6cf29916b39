pub mod admin;
pub mod forum;
pub mod location;
pub mod profiles;
pub mod upload;

use crate::helper::response_helpers::query_error_handler;
use actix_web::web;
use serde::Deserialize;

/// `?id=` for PUT and DELETE on the collection routes.
#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Mounts every JSON endpoint under `/api`.
pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(forum::config_forum)
            .configure(profiles::config_profiles)
            .configure(admin::config_admin)
            .configure(location::config_location)
            .configure(upload::config_upload),
    );
}
