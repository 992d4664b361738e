//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::cache::{CacheOptions, TagCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, InvalidateResponse,
    SetRequest, SetResponse, StatsResponse, TagsRequest,
};
use crate::validity::ValidityManager;

/// Application state shared across all handlers.
///
/// `TagCache` is itself a shared handle, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub cache: TagCache<Value>,
}

impl AppState {
    pub fn new(cache: TagCache<Value>) -> Self {
        Self { cache }
    }

    /// Builds the cache described by the configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::from_options(config.cache_options().await?)
    }

    pub fn from_options(options: CacheOptions) -> Result<Self> {
        Ok(Self::new(TagCache::new(options)?))
    }
}

fn validated(req: TagsRequest) -> Result<Vec<String>> {
    match req.validate() {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(req.tags),
    }
}

/// Handler for PUT /entries
///
/// Stores a value under a tag set with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.cache.set(req.tags.as_slice(), req.value, ttl).await?;

    Ok(Json(SetResponse::new(req.tags)))
}

/// Handler for POST /entries/lookup
///
/// Returns the live value for a tag set, or 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Json(req): Json<TagsRequest>,
) -> Result<Json<GetResponse>> {
    let tags = validated(req)?;

    match state.cache.get(tags.as_slice()).await? {
        Some(value) => Ok(Json(GetResponse::new(tags, value))),
        None => Err(CacheError::NotFound(format!("{:?}", tags))),
    }
}

/// Handler for POST /entries/check
pub async fn has_handler(
    State(state): State<AppState>,
    Json(req): Json<TagsRequest>,
) -> Result<Json<HasResponse>> {
    let tags = validated(req)?;
    let exists = state.cache.has(tags.as_slice()).await?;

    Ok(Json(HasResponse { tags, exists }))
}

/// Handler for DELETE /entries
pub async fn delete_handler(
    State(state): State<AppState>,
    Json(req): Json<TagsRequest>,
) -> Result<Json<DeleteResponse>> {
    let tags = validated(req)?;
    let deleted = state.cache.delete(tags.as_slice()).await;

    Ok(Json(DeleteResponse { tags, deleted }))
}

/// Handler for POST /invalidate
///
/// Invalidates every entry stored under any of the given tags.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<TagsRequest>,
) -> Result<Json<InvalidateResponse>> {
    let tags = validated(req)?;
    state.cache.invalidate(tags.as_slice()).await?;

    Ok(Json(InvalidateResponse::new(tags)))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;

    Json(ClearResponse {
        message: "Cache cleared".to_string(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.manager().name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(tags: &[&str]) -> TagsRequest {
        TagsRequest {
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn set_request(tags: &[&str], value: Value) -> SetRequest {
        SetRequest {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            value,
            ttl_ms: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = AppState::new(TagCache::local());

        let result = set_handler(
            State(state.clone()),
            Json(set_request(&["b", "a"], json!("test_value"))),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Json(tags(&["a", "b"])))
            .await
            .unwrap();
        assert_eq!(response.value, json!("test_value"));
    }

    #[tokio::test]
    async fn test_get_missing_entry() {
        let state = AppState::new(TagCache::local());

        let result = get_handler(State(state), Json(tags(&["missing"]))).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = AppState::new(TagCache::local());

        set_handler(State(state.clone()), Json(set_request(&["a", "b"], json!(1))))
            .await
            .unwrap();
        invalidate_handler(State(state.clone()), Json(tags(&["b"])))
            .await
            .unwrap();

        let response = has_handler(State(state), Json(tags(&["a", "b"])))
            .await
            .unwrap();
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = AppState::new(TagCache::local());

        set_handler(State(state.clone()), Json(set_request(&["a"], json!(1))))
            .await
            .unwrap();

        let response = delete_handler(State(state.clone()), Json(tags(&["a"])))
            .await
            .unwrap();
        assert!(response.deleted);

        let response = delete_handler(State(state), Json(tags(&["a"])))
            .await
            .unwrap();
        assert!(!response.deleted);
    }

    #[tokio::test]
    async fn test_clear_and_stats_handler() {
        let state = AppState::new(TagCache::local());

        set_handler(State(state.clone()), Json(set_request(&["a"], json!(1))))
            .await
            .unwrap();
        clear_handler(State(state.clone())).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.total_entries, 0);
        assert_eq!(response.hits, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = AppState::new(TagCache::local());

        let response = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.manager, "local");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = AppState::new(TagCache::local());

        let result = set_handler(State(state), Json(set_request(&[], json!(1)))).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
