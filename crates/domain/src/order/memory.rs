use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use super::{Order, OrderRepository, OrderStatus, RepositoryError};

#[derive(Debug, Default)]
struct RepositoryState {
    orders: HashMap<OrderId, Order>,
    last_id: i64,
    create_calls: usize,
    enable_calls: usize,
    fail_on_create: bool,
    reject_enable: bool,
}

/// In-memory order repository for tests and local runs.
///
/// Ids are handed out from a sequence starting at 1. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<RepositoryState>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures every subsequent create to fail with a backend error.
    pub async fn set_fail_on_create(&self, fail: bool) {
        self.state.write().await.fail_on_create = fail;
    }

    /// Configures every subsequent enable to report zero affected rows,
    /// leaving stored orders untouched.
    pub async fn set_reject_enable(&self, reject: bool) {
        self.state.write().await.reject_enable = reject;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns how many times `create` was called.
    pub async fn create_calls(&self) -> usize {
        self.state.read().await.create_calls
    }

    /// Returns how many times `enable` was called.
    pub async fn enable_calls(&self) -> usize {
        self.state.read().await.enable_calls
    }

    /// Returns the stored status of an order.
    pub async fn stored_status(&self, id: OrderId) -> Option<OrderStatus> {
        self.state.read().await.orders.get(&id).map(Order::status)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &mut Order) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.create_calls += 1;

        if let Some(id) = order.id() {
            return Err(RepositoryError::AlreadyPersisted(id));
        }
        if state.fail_on_create {
            return Err(RepositoryError::Backend("injected create failure".into()));
        }

        state.last_id += 1;
        let id = OrderId::new(state.last_id);
        order.assign_id(id);
        state.orders.insert(id, order.clone());

        Ok(())
    }

    async fn enable(&self, order: &Order) -> Result<bool, RepositoryError> {
        let id = order.id().ok_or(RepositoryError::NotPersisted)?;

        let mut state = self.state.write().await;
        state.enable_calls += 1;

        if state.reject_enable {
            return Ok(false);
        }

        // Conditional update: only a CREATED record counts as an affected row.
        match state.orders.get_mut(&id) {
            Some(stored) if stored.status().can_enable() => {
                stored.mark_enabled();
                Ok(true)
            }
            _ => Err(RepositoryError::EnableFailure(id)),
        }
    }

    async fn find(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }
}
