//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for POST /entries/lookup
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested tags
    pub tags: Vec<String>,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(tags: Vec<String>, value: Value) -> Self {
        Self { tags, value }
    }
}

/// Response body for POST /entries/check
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub tags: Vec<String>,
    /// Whether a live entry exists
    pub exists: bool,
}

/// Response body for the SET operation (PUT /entries)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The tags that were set
    pub tags: Vec<String>,
}

impl SetResponse {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            message: format!("Entry for {:?} set successfully", tags),
            tags,
        }
    }
}

/// Response body for DELETE /entries
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub tags: Vec<String>,
    /// Whether an entry was removed
    pub deleted: bool,
}

/// Response body for POST /invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub tags: Vec<String>,
}

impl InvalidateResponse {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            message: format!("Tags {:?} invalidated", tags),
            tags,
        }
    }
}

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Entries dropped after their TTL elapsed
    pub expired: u64,
    /// Entries dropped after one of their tags was invalidated
    pub stale: u64,
    /// Number of invalidate calls
    pub invalidations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            stale: stats.stale,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Validity manager in use
    pub manager: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(manager: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            manager: manager.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new(vec!["a".to_string()], json!({"foo": "bar"}));
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body, json!({"tags": ["a"], "value": {"foo": "bar"}}));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new(vec!["my_tag".to_string()]);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_tag"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            stale: 5,
            total_entries: 100,
            ..Default::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.stale, 5);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("local");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("local"));
    }
}
