use crate::models::{ActivityLogEntry, Post, Profile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub posts_count: usize,
    pub profiles_count: usize,
    pub emergency_count: usize,
    pub adopted_count: usize,
    pub waiting_count: usize,
    pub medical_count: usize,
    pub community_count: usize,
    pub api_calls: u64,
    pub recent_activity: Vec<ActivityLogEntry>,
    pub total_likes: u64,
    pub total_comments: u64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TypeBreakdown {
    pub cats: usize,
    pub dogs: usize,
    pub others: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StatusBreakdown {
    pub waiting: usize,
    pub medical: usize,
    pub adopted: usize,
    pub community: usize,
}

/// Statistics served by the admin `stats` action.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    #[serde(flatten)]
    pub base: StoreStats,
    pub type_breakdown: TypeBreakdown,
    pub status_breakdown: StatusBreakdown,
    pub emergency_posts: usize,
    pub communities: BTreeMap<String, usize>,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub export_time: DateTime<Utc>,
    pub posts: Vec<Post>,
    pub profiles: Vec<Profile>,
    pub stats: StoreStats,
}

/// Import body. Each present collection replaces the stored one wholesale.
#[derive(Debug, Deserialize, Default)]
pub struct ImportPayload {
    pub posts: Option<Vec<Post>>,
    pub profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub posts_imported: usize,
    pub profiles_imported: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ResetSummary {
    pub posts: usize,
    pub profiles: usize,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreOverview {
    pub posts: usize,
    pub profiles: usize,
    pub api_calls: u64,
}
