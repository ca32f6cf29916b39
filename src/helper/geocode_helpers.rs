//! Reverse geocoding through the Tencent map API, with a fixed mock address
//! when no API key is configured.

use crate::config::Config;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const TENCENT_GEOCODER_URL: &str = "https://apis.map.qq.com/ws/geocoder/v1/";

static COMMUNITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("小区|花园|公寓|社区|园|庭|居|苑|城|府").expect("community keyword pattern is valid")
});

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoder request timed out")]
    Timeout,
    #[error("Geocoder returned status {code}: {message}")]
    Upstream { code: i64, message: String },
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("Malformed geocoder response: {0}")]
    MalformedResponse(String),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout
        } else if err.is_decode() {
            GeocodeError::MalformedResponse(err.to_string())
        } else {
            GeocodeError::Http(err)
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeSource {
    MockData,
    TencentMapApi,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub street_number: String,
    pub community: String,
    pub community_type: String,
    #[serde(skip)]
    pub source: GeocodeSource,
}

#[derive(Debug, Deserialize)]
pub struct TencentResponse {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub result: Option<TencentResult>,
}

#[derive(Debug, Deserialize)]
pub struct TencentResult {
    #[serde(default)]
    pub address: String,
    pub formatted_addresses: Option<FormattedAddresses>,
    #[serde(default)]
    pub address_component: AddressComponent,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

#[derive(Debug, Deserialize)]
pub struct FormattedAddresses {
    pub recommend: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AddressComponent {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub street_number: String,
}

#[derive(Debug, Deserialize)]
pub struct Poi {
    pub title: String,
}

/// Picks a residential-area name: the first POI whose title carries a
/// community keyword, else the street, else a placeholder.
pub fn extract_community(pois: &[Poi], street: &str) -> (String, &'static str) {
    if let Some(poi) = pois.iter().find(|poi| COMMUNITY_PATTERN.is_match(&poi.title)) {
        return (poi.title.clone(), "poi_matched");
    }
    if street.is_empty() {
        ("未知区域".to_string(), "fallback")
    } else {
        (street.to_string(), "fallback")
    }
}

pub fn mock_result() -> GeocodeResult {
    GeocodeResult {
        formatted_address: "上海市浦东新区张江高科技园区".to_string(),
        province: "上海市".to_string(),
        city: "上海市".to_string(),
        district: "浦东新区".to_string(),
        street: "张江路".to_string(),
        street_number: String::new(),
        community: "张江小区".to_string(),
        community_type: "mock_data".to_string(),
        source: GeocodeSource::MockData,
    }
}

/// Maps a decoded provider response onto our result, or the provider's error.
pub fn interpret_response(response: TencentResponse) -> Result<GeocodeResult, GeocodeError> {
    if response.status != 0 {
        return Err(GeocodeError::Upstream { code: response.status, message: response.message });
    }
    let result = response
        .result
        .ok_or_else(|| GeocodeError::MalformedResponse("status 0 without a result".to_string()))?;

    let component = result.address_component;
    let (community, community_type) = extract_community(&result.pois, &component.street);
    let formatted_address = result
        .formatted_addresses
        .and_then(|f| f.recommend)
        .unwrap_or(result.address);

    Ok(GeocodeResult {
        formatted_address,
        province: component.province,
        city: component.city,
        district: component.district,
        street: component.street,
        street_number: component.street_number,
        community,
        community_type: community_type.to_string(),
        source: GeocodeSource::TencentMapApi,
    })
}

enum Backend {
    Mock,
    Tencent {
        client: reqwest::Client,
        key: String,
        endpoint: Url,
    },
}

pub struct Geocoder {
    backend: Backend,
}

impl Geocoder {
    pub fn mock() -> Self {
        Geocoder { backend: Backend::Mock }
    }

    pub fn tencent(key: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        Self::with_endpoint(key, timeout, TENCENT_GEOCODER_URL)
    }

    pub fn with_endpoint(key: &str, timeout: Duration, endpoint: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Geocoder {
            backend: Backend::Tencent {
                client,
                key: key.to_string(),
                endpoint: Url::parse(endpoint)?,
            },
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GeocodeError> {
        match config.tencent_map_key.as_deref() {
            Some(key) => Self::tencent(key, Duration::from_secs(config.geocoder_timeout_secs)),
            None => {
                log::warn!("TENCENT_MAP_KEY is not set. Location lookups will return mock data.");
                Ok(Self::mock())
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.backend, Backend::Tencent { .. })
    }

    pub async fn geocode(&self, latitude: f64, longitude: f64) -> Result<GeocodeResult, GeocodeError> {
        match &self.backend {
            Backend::Mock => Ok(mock_result()),
            Backend::Tencent { client, key, endpoint } => {
                let mut url = endpoint.clone();
                url.query_pairs_mut()
                    .append_pair("location", &format!("{},{}", latitude, longitude))
                    .append_pair("key", key)
                    .append_pair("get_poi", "1");

                let response: TencentResponse = client.get(url).send().await?.json().await?;
                interpret_response(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> TencentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn community_prefers_keyword_poi() {
        let pois = vec![
            Poi { title: "星巴克".to_string() },
            Poi { title: "阳光花园".to_string() },
            Poi { title: "幸福小区".to_string() },
        ];
        assert_eq!(extract_community(&pois, "张江路"), ("阳光花园".to_string(), "poi_matched"));
    }

    #[test]
    fn community_falls_back_to_street_then_placeholder() {
        let pois = vec![Poi { title: "便利店".to_string() }];
        assert_eq!(extract_community(&pois, "淮海路"), ("淮海路".to_string(), "fallback"));
        assert_eq!(extract_community(&[], ""), ("未知区域".to_string(), "fallback"));
    }

    #[test]
    fn successful_response_is_mapped() {
        let response = decode(json!({
            "status": 0,
            "message": "query ok",
            "result": {
                "address": "上海市黄浦区人民大道",
                "formatted_addresses": { "recommend": "黄浦区人民广场" },
                "address_component": {
                    "province": "上海市",
                    "city": "上海市",
                    "district": "黄浦区",
                    "street": "人民大道",
                    "street_number": "人民大道200号"
                },
                "pois": [{ "title": "人民公园" }]
            }
        }));

        let result = interpret_response(response).unwrap();
        assert_eq!(result.formatted_address, "黄浦区人民广场");
        assert_eq!(result.district, "黄浦区");
        assert_eq!(result.street_number, "人民大道200号");
        assert_eq!(result.community, "人民公园");
        assert_eq!(result.community_type, "poi_matched");
        assert_eq!(result.source, GeocodeSource::TencentMapApi);
    }

    #[test]
    fn non_zero_status_is_an_upstream_error() {
        let response = decode(json!({ "status": 311, "message": "key格式错误" }));
        match interpret_response(response) {
            Err(GeocodeError::Upstream { code, message }) => {
                assert_eq!(code, 311);
                assert_eq!(message, "key格式错误");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn mock_backend_returns_fixed_address() {
        let geocoder = Geocoder::mock();
        assert!(!geocoder.is_live());
        let result = geocoder.geocode(31.2304, 121.4737).await.unwrap();
        assert_eq!(result, mock_result());
        assert_eq!(result.source, GeocodeSource::MockData);
    }
}
