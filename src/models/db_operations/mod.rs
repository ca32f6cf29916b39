use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    PostNotFound(String),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub mod admin_db_operations;
pub mod posts_db_operations;
pub mod profiles_db_operations;
