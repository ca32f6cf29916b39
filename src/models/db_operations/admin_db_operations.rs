use crate::models::admin_models::{
    DetailedStats, ExportSnapshot, ImportPayload, ImportSummary, ResetSummary, StatusBreakdown,
    StoreOverview, StoreStats, TypeBreakdown,
};
use crate::models::data_store::DataStore;
use crate::models::db_operations::StoreError;
use crate::models::{ActivityType, ProfileStatus};
use chrono::Utc;
use std::collections::BTreeMap;

const RECENT_ACTIVITY_LEN: usize = 10;

fn count_status(store: &DataStore, status: ProfileStatus) -> usize {
    store.profiles.iter().filter(|p| status.matches(&p.current_status)).count()
}

fn count_kind(store: &DataStore, kind: &str) -> usize {
    store.profiles.iter().filter(|p| p.kind == kind).count()
}

pub fn stats(store: &DataStore) -> StoreStats {
    StoreStats {
        posts_count: store.posts.len(),
        profiles_count: store.profiles.len(),
        emergency_count: store.posts.iter().filter(|p| p.is_emergency).count(),
        adopted_count: count_status(store, ProfileStatus::Adopted),
        waiting_count: count_status(store, ProfileStatus::Waiting),
        medical_count: count_status(store, ProfileStatus::Medical),
        community_count: count_status(store, ProfileStatus::Community),
        api_calls: store.api_call_count,
        recent_activity: store.activity_log.iter().take(RECENT_ACTIVITY_LEN).cloned().collect(),
        total_likes: store.posts.iter().map(|p| u64::from(p.likes)).sum(),
        total_comments: store.posts.iter().map(|p| u64::from(p.comments)).sum(),
    }
}

pub fn detailed_stats(store: &DataStore) -> DetailedStats {
    let base = stats(store);

    let mut communities = BTreeMap::new();
    for community in store.profiles.iter().filter_map(|p| p.community.as_deref()) {
        *communities.entry(community.to_string()).or_insert(0) += 1;
    }

    DetailedStats {
        type_breakdown: TypeBreakdown {
            cats: count_kind(store, "猫"),
            dogs: count_kind(store, "狗"),
            others: count_kind(store, "其他"),
        },
        status_breakdown: StatusBreakdown {
            waiting: base.waiting_count,
            medical: base.medical_count,
            adopted: base.adopted_count,
            community: base.community_count,
        },
        emergency_posts: base.emergency_count,
        communities,
        last_update: Utc::now(),
        base,
    }
}

pub fn overview(store: &DataStore) -> StoreOverview {
    StoreOverview {
        posts: store.posts.len(),
        profiles: store.profiles.len(),
        api_calls: store.api_call_count,
    }
}

pub fn export_data(store: &DataStore) -> ExportSnapshot {
    ExportSnapshot {
        export_time: Utc::now(),
        posts: store.posts.clone(),
        profiles: store.profiles.clone(),
        stats: stats(store),
    }
}

/// Decodes an import body. Nothing in the store is touched here, so a bad
/// payload can never leave the collections half-replaced.
pub fn parse_import_payload(value: serde_json::Value) -> Result<ImportPayload, StoreError> {
    Ok(serde_json::from_value(value)?)
}

pub fn import_data(store: &mut DataStore, payload: ImportPayload) -> ImportSummary {
    let summary = ImportSummary {
        posts_imported: payload.posts.as_ref().map_or(0, Vec::len),
        profiles_imported: payload.profiles.as_ref().map_or(0, Vec::len),
    };

    if let Some(posts) = payload.posts {
        store.posts = posts;
    }
    if let Some(profiles) = payload.profiles {
        store.profiles = profiles;
    }

    store.log_activity(ActivityType::ImportData, "Imported data".to_string());
    log::info!(
        "Imported {} posts and {} profiles",
        summary.posts_imported,
        summary.profiles_imported
    );
    summary
}

pub fn reset_data(store: &mut DataStore) -> ResetSummary {
    store.reinitialize();
    log::warn!("Data store reset to seed data");
    ResetSummary {
        posts: store.posts.len(),
        profiles: store.profiles.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::posts_db_operations;
    use serde_json::json;

    #[test]
    fn status_counts_partition_the_seed_profiles() {
        let store = DataStore::seeded();
        let s = stats(&store);
        assert_eq!(
            s.adopted_count + s.waiting_count + s.medical_count + s.community_count,
            s.profiles_count
        );
        assert_eq!(s.community_count, 32);
        assert_eq!(s.emergency_count, 1);
        assert_eq!(s.total_likes, 12 + 8 + 15 + 25 + 18);
        assert_eq!(s.total_comments, 5 + 3 + 7 + 10 + 12);
    }

    #[test]
    fn recent_activity_is_capped_at_ten() {
        let mut store = DataStore::seeded();
        for _ in 0..15 {
            posts_db_operations::like_post(&mut store, "F20250826-001").unwrap();
        }
        assert_eq!(stats(&store).recent_activity.len(), RECENT_ACTIVITY_LEN);
    }

    #[test]
    fn detailed_stats_breaks_down_types_and_communities() {
        let store = DataStore::seeded();
        let detailed = detailed_stats(&store);
        assert_eq!(detailed.type_breakdown, TypeBreakdown { cats: 34, dogs: 1, others: 0 });
        assert_eq!(detailed.communities.get("海和院小区"), Some(&32));
        assert_eq!(detailed.status_breakdown.adopted, 1);
    }

    #[test]
    fn import_replaces_only_present_collections() {
        let mut store = DataStore::seeded();
        let profiles_before = store.profiles().len();

        let payload = parse_import_payload(json!({ "posts": [] })).unwrap();
        let summary = import_data(&mut store, payload);

        assert_eq!(summary, ImportSummary { posts_imported: 0, profiles_imported: 0 });
        assert!(store.posts().is_empty());
        assert_eq!(store.profiles().len(), profiles_before);
        assert_eq!(store.activity_log()[0].kind, ActivityType::ImportData);
    }

    #[test]
    fn malformed_import_is_rejected_before_mutation() {
        let store = DataStore::seeded();
        let result = parse_import_payload(json!({
            "posts": [],
            "profiles": [{ "name": "missing everything else" }]
        }));
        assert!(matches!(result, Err(StoreError::SerdeJson(_))));
        assert_eq!(store.posts().len(), 5);
    }

    #[test]
    fn export_round_trips_through_import() {
        let mut source = DataStore::seeded();
        posts_db_operations::like_post(&mut source, "F20250826-003").unwrap();
        let exported = serde_json::to_value(export_data(&source)).unwrap();

        let mut target = DataStore::empty();
        let summary = import_data(&mut target, parse_import_payload(exported).unwrap());

        assert_eq!(summary.posts_imported, 5);
        assert_eq!(summary.profiles_imported, 35);
        assert_eq!(target.posts(), source.posts());
        assert_eq!(target.profiles(), source.profiles());
    }
}
