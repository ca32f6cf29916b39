use crate::helper::geocode_helpers::GeocodeError;
use crate::models::db_operations::StoreError;
use actix_web::error::QueryPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Every failure an endpoint can report. Each variant renders as the usual
/// `{ success: false, error, ... }` envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, details: Map<String, Value> },
    #[error("Missing required fields: {missing:?}")]
    MissingFields {
        missing: Vec<&'static str>,
        required: &'static [&'static str],
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    MethodNotAllowed {
        message: String,
        allowed: &'static [&'static str],
    },
    #[error("Upstream request timed out")]
    UpstreamTimeout,
    #[error("Geocoding failed (status {code}): {message}")]
    Upstream { code: i64, message: String },
    // The raw message is echoed to the caller.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation { message: message.into(), details: Map::new() }
    }

    /// Validation error carrying extra top-level fields in the envelope.
    pub fn validation_with(message: impl Into<String>, details: Value) -> Self {
        let details = match details {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("details".to_string(), other);
                map
            }
        };
        ApiError::Validation { message: message.into(), details }
    }

    pub fn method_not_allowed(message: impl Into<String>, allowed: &'static [&'static str]) -> Self {
        ApiError::MethodNotAllowed { message: message.into(), allowed }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::Validation { message, details } => {
                let mut body = Map::new();
                body.insert("success".to_string(), Value::Bool(false));
                body.insert("error".to_string(), Value::String(message.clone()));
                for (key, value) in details {
                    body.insert(key.clone(), value.clone());
                }
                Value::Object(body)
            }
            ApiError::MissingFields { missing, required } => json!({
                "success": false,
                "error": "Missing required fields",
                "missingFields": missing,
                "requiredFields": required,
            }),
            ApiError::NotFound(message) => json!({ "success": false, "error": message }),
            ApiError::MethodNotAllowed { message, allowed } => json!({
                "success": false,
                "error": message,
                "allowedMethods": allowed,
            }),
            ApiError::UpstreamTimeout => json!({
                "success": false,
                "error": "Upstream request timed out",
            }),
            ApiError::Upstream { code, message } => json!({
                "success": false,
                "error": "Geocoding failed",
                "code": code,
                "message": message,
            }),
            ApiError::Internal(message) => json!({
                "success": false,
                "error": "Internal server error",
                "message": message,
            }),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::MissingFields { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PostNotFound(_) | StoreError::ProfileNotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::SerdeJson(e) => {
                ApiError::validation_with("Invalid import data", json!({ "message": e.to_string() }))
            }
        }
    }
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Timeout => ApiError::UpstreamTimeout,
            GeocodeError::Upstream { code, message } => ApiError::Upstream { code, message },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Builds a `{ success: true, data, message? }` response.
pub fn envelope<T: Serialize>(status: StatusCode, data: T, message: Option<&str>) -> HttpResponse {
    let mut body = json!({ "success": true, "data": data });
    if let Some(message) = message {
        body["message"] = Value::String(message.to_string());
    }
    HttpResponse::build(status).json(body)
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    envelope(StatusCode::OK, data, None)
}

pub fn method_not_allowed(allowed: &'static [&'static str]) -> HttpResponse {
    ApiError::method_not_allowed("Method not allowed", allowed).error_response()
}

/// Decodes a JSON request body. An empty body decodes as `T::default()`, so
/// missing-field checks report on it instead of a parse error.
pub fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation_with("Invalid JSON body", json!({ "message": e.to_string() })))
}

pub fn require_id<'a>(id: &'a Option<String>, what: &str) -> Result<&'a str, ApiError> {
    id.as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation(format!("Missing {} id", what)))
}

/// Turns unparseable query strings into the standard 400 envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation_with("Invalid query string", json!({ "message": err.to_string() })).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::UpstreamTimeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::Upstream { code: 311, message: "bad key".into() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::method_not_allowed("no", &["GET"]).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn validation_details_are_flattened_into_the_envelope() {
        let err = ApiError::validation_with("Out of range", json!({ "valid_range": { "latitude": "[-90, 90]" } }));
        let body = err.body();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Out of range");
        assert_eq!(body["valid_range"]["latitude"], "[-90, 90]");
    }

    #[derive(serde::Deserialize, Default, Debug)]
    struct Body {
        name: Option<String>,
    }

    #[test]
    fn empty_body_decodes_as_default() {
        let body: Body = parse_json_body(b"  ").unwrap();
        assert!(body.name.is_none());
        let body: Body = parse_json_body(br#"{"name":"x"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("x"));
        assert!(parse_json_body::<Body>(b"{not json").is_err());
    }

    #[test]
    fn require_id_rejects_blank_ids() {
        assert!(require_id(&None, "post").is_err());
        assert!(require_id(&Some("  ".into()), "post").is_err());
        assert_eq!(require_id(&Some("F1".into()), "post").unwrap(), "F1");
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ApiError = StoreError::PostNotFound("F1".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
