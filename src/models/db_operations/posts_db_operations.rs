use crate::models::data_store::{paginate, parse_page_param, DataStore, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::models::db_operations::StoreError;
use crate::models::{ActivityType, NewPost, Post, PostPage, PostPatch, PostQuery};
use chrono::Utc;

fn matches_query(post: &Post, query: &PostQuery, search: Option<&str>) -> bool {
    if query.emergency.as_deref() == Some("true") && !post.is_emergency {
        return false;
    }
    if let Some(kind) = query.kind.as_deref().filter(|k| !k.is_empty()) {
        if !post.tags.iter().any(|tag| tag.contains(kind)) {
            return false;
        }
    }
    if let Some(needle) = search {
        if !post.title.to_lowercase().contains(needle) && !post.content.to_lowercase().contains(needle) {
            return false;
        }
    }
    true
}

/// Filters, sorts newest-first and paginates the forum. Counts as one API call.
pub fn read_post_page(store: &mut DataStore, query: &PostQuery) -> PostPage {
    store.record_api_call();

    let search = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase());

    let mut matching: Vec<Post> = store
        .posts
        .iter()
        .filter(|p| matches_query(p, query, search.as_deref()))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.create_time.cmp(&a.create_time));

    let page = parse_page_param(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_page_param(query.limit.as_deref(), DEFAULT_LIMIT);
    let (posts, pagination) = paginate(matching, page, limit);

    PostPage { posts, pagination }
}

pub fn read_post(store: &DataStore, post_id: &str) -> Option<Post> {
    store.posts.iter().find(|p| p.id == post_id).cloned()
}

pub fn create_post(store: &mut DataStore, new_post: NewPost) -> Post {
    let now = Utc::now();
    let id = store.generate_post_id(now);
    let post = new_post.into_post(id, now);

    store.posts.push(post.clone());
    store.log_activity(ActivityType::CreatePost, format!("Created post: {}", post.title));
    log::info!("Created post '{}'", post.id);
    post
}

pub fn update_post(store: &mut DataStore, post_id: &str, patch: PostPatch) -> Result<Post, StoreError> {
    let index = store
        .posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| StoreError::PostNotFound(post_id.to_string()))?;

    let merged = patch.merged_into(&store.posts[index], Utc::now());
    store.posts[index] = merged.clone();

    store.log_activity(ActivityType::UpdatePost, format!("Updated post: {}", post_id));
    Ok(merged)
}

pub fn delete_post(store: &mut DataStore, post_id: &str) -> Result<Post, StoreError> {
    let index = store
        .posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| StoreError::PostNotFound(post_id.to_string()))?;

    let deleted = store.posts.remove(index);
    store.log_activity(ActivityType::DeletePost, format!("Deleted post: {}", deleted.title));
    log::info!("Deleted post '{}'", deleted.id);
    Ok(deleted)
}

pub fn like_post(store: &mut DataStore, post_id: &str) -> Result<Post, StoreError> {
    let post = store
        .posts
        .iter_mut()
        .find(|p| p.id == post_id)
        .ok_or_else(|| StoreError::PostNotFound(post_id.to_string()))?;

    post.likes = post.likes.saturating_add(1);
    post.update_time = Utc::now();
    let liked = post.clone();

    store.log_activity(ActivityType::LikePost, format!("Liked post: {}", liked.title));
    Ok(liked)
}
