pub mod geocode_helpers;
pub mod response_helpers;
pub mod upload_helpers;
