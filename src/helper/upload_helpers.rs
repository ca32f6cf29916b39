use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
pub const DEFAULT_EXTENSION: &str = ".jpg";
pub const UPLOAD_ID_PREFIX: &str = "IMG";

const SAMPLE_IMAGES: [&str; 6] = [
    "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba",
    "https://images.unsplash.com/photo-1533738363-b7f9aef128ce",
    "https://images.unsplash.com/photo-1548247416-ec66f4900b2e",
    "https://images.unsplash.com/photo-1543852786-1cf6624b9987",
    "https://images.unsplash.com/photo-1558788353-f76d92427f16",
    "https://images.unsplash.com/photo-1560114928-40f1f1eb26a0",
];

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_data: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub file_id: String,
    pub original_name: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub url: String,
    pub thumbnail_url: String,
    pub upload_time: DateTime<Utc>,
    pub status: &'static str,
    pub message: &'static str,
}

pub fn is_allowed_type(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// Extension of `file_name` including the dot, or `.jpg` when there is none.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[index..],
        None => DEFAULT_EXTENSION,
    }
}

/// Size in bytes of the uploaded payload. Data URLs are measured by their
/// decoded base64 length, anything else by its raw length.
pub fn estimate_file_size(file_data: &str) -> u64 {
    match file_data.split_once("base64,") {
        Some((_, encoded)) => (encoded.len() as f64 * 0.75).round() as u64,
        None => file_data.len() as u64,
    }
}

/// Nothing is stored; the upload is answered with a stock photo URL.
pub fn build_upload_result(file_id: String, file_name: &str, file_type: Option<&str>, file_size: u64) -> UploadResult {
    let image = SAMPLE_IMAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SAMPLE_IMAGES[0]);

    UploadResult {
        file_name: format!("{}{}", file_id, file_extension(file_name)),
        file_id,
        original_name: file_name.to_string(),
        file_type: file_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
        file_size,
        url: format!("{}?w=800", image),
        thumbnail_url: format!("{}?w=200", image),
        upload_time: Utc::now(),
        status: "uploaded",
        message: "File uploaded successfully",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_defaults_to_jpg() {
        assert_eq!(file_extension("kitten.png"), ".png");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("kitten"), ".jpg");
    }

    #[test]
    fn base64_size_is_three_quarters_of_payload() {
        assert_eq!(estimate_file_size("data:image/png;base64,AAAABBBB"), 6);
        assert_eq!(estimate_file_size("plain-bytes"), 11);
    }

    #[test]
    fn only_image_types_are_allowed() {
        assert!(is_allowed_type("image/webp"));
        assert!(!is_allowed_type("application/pdf"));
    }

    #[test]
    fn result_uses_stock_urls_and_renamed_file() {
        let result = build_upload_result("IMG20250826-123456".to_string(), "cat.png", None, 10);
        assert_eq!(result.file_name, "IMG20250826-123456.png");
        assert_eq!(result.file_type, "image/jpeg");
        assert!(result.url.starts_with("https://images.unsplash.com/") && result.url.ends_with("?w=800"));
        assert!(result.thumbnail_url.ends_with("?w=200"));
        assert_eq!(result.status, "uploaded");
    }
}
