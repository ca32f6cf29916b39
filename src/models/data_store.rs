use crate::models::{ActivityLogEntry, ActivityType, Pagination, Post, Profile};
use crate::setup::seed_data;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Number of audit entries kept; older ones fall off the tail.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

pub const POST_ID_PREFIX: &str = "F";
pub const PROFILE_ID_PREFIX: &str = "A";
pub const LOG_ID_PREFIX: &str = "LOG";

/// In-memory owner of every post, profile and audit entry.
///
/// The store does no locking of its own; `AppState` keeps it behind an
/// `RwLock` and each operation runs under one guard.
#[derive(Debug, Default)]
pub struct DataStore {
    pub(crate) posts: Vec<Post>,
    pub(crate) profiles: Vec<Profile>,
    pub(crate) activity_log: VecDeque<ActivityLogEntry>,
    pub(crate) api_call_count: u64,
    id_cursor_millis: i64,
}

/// Formats `<prefix><YYYYMMDD>-<last six digits of millis>`.
pub fn format_id(prefix: &str, date: DateTime<Utc>, millis: i64) -> String {
    format!(
        "{}{}-{:06}",
        prefix,
        date.format("%Y%m%d"),
        millis.rem_euclid(1_000_000)
    )
}

/// Parses a `page`/`limit` query value from its leading digits, so `2abc`
/// reads as 2. No digits, or zero, falls back to `default`.
pub fn parse_page_param(raw: Option<&str>, default: usize) -> usize {
    raw.map(str::trim_start)
        .and_then(|s| {
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            s[..end].parse::<usize>().ok()
        })
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Slices one page out of an already filtered and sorted list.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let limit = limit.max(1);
    let total = items.len();
    let start = page.saturating_sub(1).saturating_mul(limit);
    let slice: Vec<T> = items.into_iter().skip(start).take(limit).collect();
    let pagination = Pagination {
        page,
        limit,
        total,
        total_pages: total.div_ceil(limit),
    };
    (slice, pagination)
}

impl DataStore {
    /// A store with no records at all. Mostly useful in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding the built-in sample posts and profiles, including a
    /// freshly generated batch of community cats.
    pub fn seeded() -> Self {
        Self {
            posts: seed_data::seed_posts(),
            profiles: seed_data::seed_profiles(),
            ..Self::default()
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn activity_log(&self) -> &VecDeque<ActivityLogEntry> {
        &self.activity_log
    }

    pub fn api_call_count(&self) -> u64 {
        self.api_call_count
    }

    pub(crate) fn record_api_call(&mut self) {
        self.api_call_count += 1;
    }

    // The cursor never repeats a millisecond value, even when the clock
    // stalls or several ids are drawn inside the same millisecond.
    fn next_millis(&mut self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis().max(self.id_cursor_millis + 1);
        self.id_cursor_millis = candidate;
        candidate
    }

    pub fn generate_id(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        let millis = self.next_millis(now);
        format_id(prefix, now, millis)
    }

    pub(crate) fn generate_post_id(&mut self, now: DateTime<Utc>) -> String {
        loop {
            let id = self.generate_id(POST_ID_PREFIX, now);
            if !self.posts.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }

    pub(crate) fn generate_profile_id(&mut self, now: DateTime<Utc>) -> String {
        loop {
            let id = self.generate_id(PROFILE_ID_PREFIX, now);
            if !self.profiles.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }

    pub(crate) fn log_activity(&mut self, kind: ActivityType, description: String) {
        let now = Utc::now();
        let entry = ActivityLogEntry {
            id: self.generate_id(LOG_ID_PREFIX, now),
            kind,
            description,
            timestamp: now,
        };
        log::debug!("Activity {:?}: {}", entry.kind, entry.description);
        self.activity_log.push_front(entry);
        self.activity_log.truncate(ACTIVITY_LOG_CAPACITY);
    }

    /// Replaces everything with fresh seed data and clears the audit log and
    /// call counter. The id cursor survives so ids stay unique across resets.
    pub(crate) fn reinitialize(&mut self) {
        let cursor = self.id_cursor_millis;
        *self = Self::seeded();
        self.id_cursor_millis = cursor;
    }
}
