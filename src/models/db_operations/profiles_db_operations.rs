use crate::models::data_store::{paginate, parse_page_param, DataStore, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::models::db_operations::StoreError;
use crate::models::{ActivityType, NewProfile, Profile, ProfilePage, ProfilePatch, ProfileQuery};
use chrono::Utc;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn matches_query(profile: &Profile, query: &ProfileQuery, search: Option<&str>) -> bool {
    if let Some(kind) = non_empty(&query.kind) {
        if profile.kind != kind {
            return false;
        }
    }
    if let Some(status) = non_empty(&query.status) {
        if profile.current_status != status {
            return false;
        }
    }
    if let Some(needle) = search {
        if !profile.name.to_lowercase().contains(needle)
            && !profile.rescue_location.to_lowercase().contains(needle)
        {
            return false;
        }
    }
    if let Some(community) = non_empty(&query.community) {
        if profile.community.as_deref() != Some(community) {
            return false;
        }
    }
    true
}

pub fn read_profile_page(store: &mut DataStore, query: &ProfileQuery) -> ProfilePage {
    store.record_api_call();

    let search = non_empty(&query.search).map(|s| s.to_lowercase());

    let mut matching: Vec<Profile> = store
        .profiles
        .iter()
        .filter(|p| matches_query(p, query, search.as_deref()))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.create_time.cmp(&a.create_time));

    let page = parse_page_param(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_page_param(query.limit.as_deref(), DEFAULT_LIMIT);
    let (profiles, pagination) = paginate(matching, page, limit);

    ProfilePage { profiles, pagination }
}

pub fn read_profile(store: &DataStore, profile_id: &str) -> Option<Profile> {
    store.profiles.iter().find(|p| p.id == profile_id).cloned()
}

pub fn create_profile(store: &mut DataStore, new_profile: NewProfile) -> Profile {
    let now = Utc::now();
    let id = store.generate_profile_id(now);
    let profile = new_profile.into_profile(id, now);

    store.profiles.push(profile.clone());
    store.log_activity(ActivityType::CreateProfile, format!("Created profile: {}", profile.name));
    log::info!("Created profile '{}'", profile.id);
    profile
}

/// Status changes go through here unchecked; any `currentStatus` string is accepted.
pub fn update_profile(
    store: &mut DataStore,
    profile_id: &str,
    patch: ProfilePatch,
) -> Result<Profile, StoreError> {
    let index = store
        .profiles
        .iter()
        .position(|p| p.id == profile_id)
        .ok_or_else(|| StoreError::ProfileNotFound(profile_id.to_string()))?;

    let merged = patch.merged_into(&store.profiles[index], Utc::now());
    store.profiles[index] = merged.clone();

    store.log_activity(ActivityType::UpdateProfile, format!("Updated profile: {}", profile_id));
    Ok(merged)
}

pub fn delete_profile(store: &mut DataStore, profile_id: &str) -> Result<Profile, StoreError> {
    let index = store
        .profiles
        .iter()
        .position(|p| p.id == profile_id)
        .ok_or_else(|| StoreError::ProfileNotFound(profile_id.to_string()))?;

    let deleted = store.profiles.remove(index);
    store.log_activity(ActivityType::DeleteProfile, format!("Deleted profile: {}", deleted.name));
    log::info!("Deleted profile '{}'", deleted.id);
    Ok(deleted)
}
