use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::GoodsId;
use tokio::sync::RwLock;

use super::{Goods, GoodsLookup, LookupError};

#[derive(Debug, Default)]
struct CatalogState {
    goods: HashMap<GoodsId, Goods>,
    latency: Option<Duration>,
    fail_with: Option<String>,
}

/// In-memory goods catalog for tests and local runs.
///
/// Clones share the same catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoodsCatalog {
    state: Arc<RwLock<CatalogState>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryGoodsCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given goods.
    pub fn with_goods(goods: impl IntoIterator<Item = Goods>) -> Self {
        let state = CatalogState {
            goods: goods.into_iter().map(|g| (g.id, g)).collect(),
            ..CatalogState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            lookups: Arc::default(),
        }
    }

    /// Adds or replaces a goods entry.
    pub async fn insert(&self, goods: Goods) {
        self.state.write().await.goods.insert(goods.id, goods);
    }

    /// Delays every lookup by `latency`.
    pub async fn set_latency(&self, latency: Option<Duration>) {
        self.state.write().await.latency = latency;
    }

    /// Makes every lookup fail with a backend error carrying `message`.
    pub async fn set_failure(&self, message: Option<String>) {
        self.state.write().await.fail_with = message;
    }

    /// Returns how many lookups have been made.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoodsLookup for InMemoryGoodsCatalog {
    async fn require_goods(&self, goods_id: GoodsId) -> Result<Goods, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let latency = self.state.read().await.latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state.read().await;
        if let Some(message) = &state.fail_with {
            return Err(LookupError::Backend(message.clone().into()));
        }

        state
            .goods
            .get(&goods_id)
            .cloned()
            .ok_or(LookupError::NotFound(goods_id))
    }
}
