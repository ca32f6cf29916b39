use crate::helper::geocode_helpers::GeocodeSource;
use crate::helper::response_helpers::{method_not_allowed, parse_json_body, ApiError};
use crate::middleware::CorsHeaders;
use crate::AppState;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

pub const LOCATION_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];

#[derive(Deserialize, Default)]
struct LocationRequest {
    latitude: Option<Value>,
    longitude: Option<Value>,
}

pub fn config_location(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/location")
            .wrap(CorsHeaders::new(LOCATION_METHODS))
            .route(web::get().to(location_status))
            .route(web::post().to(reverse_geocode))
            .default_service(web::to(|| async { method_not_allowed(LOCATION_METHODS) })),
    );
}

async fn location_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Location service is running",
        "provider": if state.geocoder.is_live() { "tencent_map_api" } else { "mock_data" },
        "usage": "POST { latitude, longitude }",
        "timestamp": Utc::now(),
    }))
}

/// Accepts JSON numbers as well as numeric strings. `None` means the value is
/// present but not a number.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        _ => false,
    }
}

fn validate_coordinates(request: &LocationRequest) -> Result<(f64, f64), ApiError> {
    if is_missing(&request.latitude) || is_missing(&request.longitude) {
        return Err(ApiError::validation_with(
            "Missing latitude or longitude",
            json!({
                "required": ["latitude", "longitude"],
                "example": { "latitude": 31.2304, "longitude": 121.4737 },
            }),
        ));
    }

    let raw_latitude = request.latitude.clone().unwrap_or(Value::Null);
    let raw_longitude = request.longitude.clone().unwrap_or(Value::Null);
    let (latitude, longitude) = match (coordinate(&raw_latitude), coordinate(&raw_longitude)) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => {
            return Err(ApiError::validation_with(
                "Latitude and longitude must be numbers",
                json!({ "received": { "latitude": raw_latitude, "longitude": raw_longitude } }),
            ))
        }
    };

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation_with(
            "Coordinates out of range",
            json!({
                "valid_range": { "latitude": "[-90, 90]", "longitude": "[-180, 180]" },
                "received": { "latitude": latitude, "longitude": longitude },
            }),
        ));
    }

    Ok((latitude, longitude))
}

async fn reverse_geocode(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let request: LocationRequest = parse_json_body(&body)?;
    let (latitude, longitude) = validate_coordinates(&request)?;

    log::debug!("Reverse geocoding ({}, {})", latitude, longitude);
    let result = state.geocoder.geocode(latitude, longitude).await?;

    let mut body = json!({
        "success": true,
        "data": result,
        "coordinates": { "latitude": latitude, "longitude": longitude },
        "source": result.source,
    });
    if result.source == GeocodeSource::MockData {
        body["message"] = json!("Mock data returned. Set TENCENT_MAP_KEY to use the live geocoder.");
    }
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(latitude: Value, longitude: Value) -> LocationRequest {
        LocationRequest { latitude: Some(latitude), longitude: Some(longitude) }
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let coords = validate_coordinates(&request(json!("31.5"), json!(121))).unwrap();
        assert_eq!(coords, (31.5, 121.0));
    }

    #[test]
    fn missing_and_malformed_coordinates_are_rejected() {
        let missing = LocationRequest { latitude: Some(json!(31.0)), longitude: None };
        assert!(matches!(validate_coordinates(&missing), Err(ApiError::Validation { .. })));

        match validate_coordinates(&request(json!("north"), json!(121.0))) {
            Err(ApiError::Validation { details, .. }) => assert!(details.contains_key("received")),
            _ => panic!("expected a format error"),
        }
    }

    #[test]
    fn range_is_inclusive() {
        assert!(validate_coordinates(&request(json!(90), json!(-180))).is_ok());
        match validate_coordinates(&request(json!(91), json!(0))) {
            Err(ApiError::Validation { details, .. }) => assert!(details.contains_key("valid_range")),
            _ => panic!("expected a range error"),
        }
        assert!(validate_coordinates(&request(json!(0), json!(180.5))).is_err());
    }
}
