#![allow(dead_code)]

use actix_web::web;
use rescue_backend::helper::geocode_helpers::Geocoder;
use rescue_backend::models::data_store::DataStore;
use rescue_backend::AppState;

/// Fresh seeded state with the mock geocoder and no upload latency.
pub fn seeded_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(DataStore::seeded(), Geocoder::mock()))
}

/// Seeded state wrapped after `adjust` has tweaked it.
pub fn state_with(adjust: impl FnOnce(&mut AppState)) -> web::Data<AppState> {
    let mut state = AppState::new(DataStore::seeded(), Geocoder::mock());
    adjust(&mut state);
    web::Data::new(state)
}

/// Builds the API service around `$state` the same way the server binary does.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(rescue_backend::routes::config_api),
        )
        .await
    };
}
