use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::config::Config;
use crate::helper::geocode_helpers::{GeocodeError, Geocoder};
use crate::models::data_store::DataStore;

/// Shared by every worker through `web::Data`. The store lock is held for
/// exactly one store operation at a time.
pub struct AppState {
    pub store: RwLock<DataStore>,
    pub geocoder: Geocoder,
    pub allowed_origins: String,
    pub upload_latency: Duration,
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(store: DataStore, geocoder: Geocoder) -> Self {
        AppState {
            store: RwLock::new(store),
            geocoder,
            allowed_origins: "*".to_string(),
            upload_latency: Duration::ZERO,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, GeocodeError> {
        let mut state = AppState::new(DataStore::seeded(), Geocoder::from_config(config)?);
        state.allowed_origins = config.allowed_origins.clone();
        state.upload_latency = Duration::from_millis(config.upload_latency_ms);
        state.max_upload_bytes = config.max_upload_bytes();
        Ok(state)
    }

    pub fn read_store(&self) -> RwLockReadGuard<'_, DataStore> {
        self.store.read().unwrap_or_else(|poisoned| {
            log::error!("RwLock for the data store was poisoned! Recovering lock.");
            poisoned.into_inner()
        })
    }

    pub fn write_store(&self) -> RwLockWriteGuard<'_, DataStore> {
        self.store.write().unwrap_or_else(|poisoned| {
            log::error!("RwLock for the data store was poisoned! Recovering lock.");
            poisoned.into_inner()
        })
    }
}

pub mod config;
pub mod helper;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod setup;
