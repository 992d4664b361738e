//! In-memory tag registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::validity::{join_tokens, mint_token, ValidityManager};

// == Local Validity Manager ==
/// Tag tokens held in process memory.
///
/// Tokens live as long as the manager; share it through an `Arc` to let
/// several caches observe each other's invalidations.
#[derive(Debug, Default)]
pub struct LocalValidityManager {
    tokens: RwLock<HashMap<String, String>>,
}

impl LocalValidityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tags that have ever been invalidated.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl ValidityManager for LocalValidityManager {
    async fn sign(&self, tags: &[String]) -> Result<String> {
        let tokens = self.tokens.read().await;
        Ok(join_tokens(tags.iter().map(|tag| tokens.get(tag))))
    }

    async fn update(&self, tags: &[String]) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        for tag in tags {
            tokens.insert(tag.clone(), mint_token());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
