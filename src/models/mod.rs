use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age_estimate: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub fur_color: String,
    #[serde(default)]
    pub health_status: String,
    #[serde(default)]
    pub current_status: String,
    pub rescue_date: String,
    pub rescue_location: String,
    #[serde(default)]
    pub rescuer: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sterilized: String,
    #[serde(default)]
    pub vaccinated: String,
    #[serde(default)]
    pub contact: String,
    pub create_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Lifecycle states a profile is expected to be in. `Profile::current_status`
/// stays a plain string, so records outside this set are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Waiting,
    Medical,
    Adopted,
    Community,
}

impl ProfileStatus {
    pub const ALL: [ProfileStatus; 4] = [
        ProfileStatus::Waiting,
        ProfileStatus::Medical,
        ProfileStatus::Adopted,
        ProfileStatus::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Waiting => "等待领养",
            ProfileStatus::Medical => "医疗中",
            ProfileStatus::Adopted => "已领养",
            ProfileStatus::Community => "社区猫",
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        self.as_str() == status
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    CreatePost,
    UpdatePost,
    DeletePost,
    LikePost,
    CreateProfile,
    UpdateProfile,
    DeleteProfile,
    ImportData,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActivityLogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Body of a forum POST. Only the fields named here can reach the store.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub is_emergency: Option<bool>,
    pub likes: Option<u32>,
    pub comments: Option<u32>,
    pub images: Option<Vec<String>>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewPost {
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["title", "content", "author"];

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.title) {
            missing.push("title");
        }
        if is_blank(&self.content) {
            missing.push("content");
        }
        if is_blank(&self.author) {
            missing.push("author");
        }
        missing
    }

    pub fn into_post(self, id: String, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            author_id: self.author_id.unwrap_or_default(),
            is_emergency: self.is_emergency.unwrap_or(false),
            likes: self.likes.unwrap_or(0),
            comments: self.comments.unwrap_or(0),
            images: self.images.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            create_time: now,
            update_time: now,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub is_emergency: Option<bool>,
    pub likes: Option<u32>,
    pub comments: Option<u32>,
    pub images: Option<Vec<String>>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    /// Returns a copy of `post` with every field present in the patch replaced.
    pub fn merged_into(self, post: &Post, now: DateTime<Utc>) -> Post {
        let mut merged = post.clone();
        if let Some(title) = self.title {
            merged.title = title;
        }
        if let Some(content) = self.content {
            merged.content = content;
        }
        if let Some(author) = self.author {
            merged.author = author;
        }
        if let Some(author_id) = self.author_id {
            merged.author_id = author_id;
        }
        if let Some(is_emergency) = self.is_emergency {
            merged.is_emergency = is_emergency;
        }
        if let Some(likes) = self.likes {
            merged.likes = likes;
        }
        if let Some(comments) = self.comments {
            merged.comments = comments;
        }
        if let Some(images) = self.images {
            merged.images = images;
        }
        if let Some(location) = self.location {
            merged.location = location;
        }
        if let Some(tags) = self.tags {
            merged.tags = tags;
        }
        merged.update_time = now;
        merged
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub age_estimate: Option<String>,
    pub weight: Option<String>,
    pub fur_color: Option<String>,
    pub health_status: Option<String>,
    pub current_status: Option<String>,
    pub rescue_date: Option<String>,
    pub rescue_location: Option<String>,
    pub rescuer: Option<String>,
    pub photos: Option<Vec<String>>,
    pub community: Option<String>,
    pub description: Option<String>,
    pub sterilized: Option<String>,
    pub vaccinated: Option<String>,
    pub contact: Option<String>,
}

impl NewProfile {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["name", "type", "rescueDate", "rescueLocation"];

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("name", &self.name),
            ("type", &self.kind),
            ("rescueDate", &self.rescue_date),
            ("rescueLocation", &self.rescue_location),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(field, _)| field)
            .collect()
    }

    pub fn into_profile(self, id: String, now: DateTime<Utc>) -> Profile {
        Profile {
            id,
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            breed: self.breed.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            age_estimate: self.age_estimate.unwrap_or_default(),
            weight: self.weight.unwrap_or_default(),
            fur_color: self.fur_color.unwrap_or_default(),
            health_status: self.health_status.unwrap_or_default(),
            current_status: self.current_status.unwrap_or_default(),
            rescue_date: self.rescue_date.unwrap_or_default(),
            rescue_location: self.rescue_location.unwrap_or_default(),
            rescuer: self.rescuer.unwrap_or_default(),
            photos: self.photos.unwrap_or_default(),
            community: self.community,
            description: self.description.unwrap_or_default(),
            sterilized: self.sterilized.unwrap_or_default(),
            vaccinated: self.vaccinated.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            create_time: now,
            update_time: None,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub age_estimate: Option<String>,
    pub weight: Option<String>,
    pub fur_color: Option<String>,
    pub health_status: Option<String>,
    pub current_status: Option<String>,
    pub rescue_date: Option<String>,
    pub rescue_location: Option<String>,
    pub rescuer: Option<String>,
    pub photos: Option<Vec<String>>,
    pub community: Option<String>,
    pub description: Option<String>,
    pub sterilized: Option<String>,
    pub vaccinated: Option<String>,
    pub contact: Option<String>,
}

impl ProfilePatch {
    pub fn merged_into(self, profile: &Profile, now: DateTime<Utc>) -> Profile {
        let mut merged = profile.clone();
        let text_fields = [
            (self.name, &mut merged.name),
            (self.kind, &mut merged.kind),
            (self.breed, &mut merged.breed),
            (self.gender, &mut merged.gender),
            (self.age_estimate, &mut merged.age_estimate),
            (self.weight, &mut merged.weight),
            (self.fur_color, &mut merged.fur_color),
            (self.health_status, &mut merged.health_status),
            (self.current_status, &mut merged.current_status),
            (self.rescue_date, &mut merged.rescue_date),
            (self.rescue_location, &mut merged.rescue_location),
            (self.rescuer, &mut merged.rescuer),
            (self.description, &mut merged.description),
            (self.sterilized, &mut merged.sterilized),
            (self.vaccinated, &mut merged.vaccinated),
            (self.contact, &mut merged.contact),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(photos) = self.photos {
            merged.photos = photos;
        }
        if self.community.is_some() {
            merged.community = self.community;
        }
        merged.update_time = Some(now);
        merged
    }
}

/// Query string of `GET /api/forum`. Numbers arrive as raw strings and are
/// parsed leniently by the store.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PostQuery {
    pub emergency: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ProfileQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub community: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub profiles: Vec<Profile>,
    pub pagination: Pagination,
}

pub mod admin_models;
pub mod data_store;
pub mod db_operations;
