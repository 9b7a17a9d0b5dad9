//! Order lifecycle: the `create` and `enable` transitions.

use std::future::Future;
use std::time::Duration;

use common::{BuyerId, GoodsId};

use crate::error::DomainError;
use crate::goods::GoodsLookup;

use super::{Order, OrderRepository, RepositoryError};

/// Drives orders through `(none) -> CREATED -> ENABLED`.
///
/// Collaborators are passed in at construction and only used through their
/// contracts. Nothing here retries; every collaborator error is returned to
/// the caller unchanged.
pub struct OrderLifecycle<G, R> {
    goods: G,
    repository: R,
    call_timeout: Option<Duration>,
}

impl<G, R> OrderLifecycle<G, R>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    /// Creates a lifecycle over the given goods lookup and repository.
    pub fn new(goods: G, repository: R) -> Self {
        Self {
            goods,
            repository,
            call_timeout: None,
        }
    }

    /// Bounds every collaborator call by `timeout`.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Returns the goods lookup.
    pub fn goods(&self) -> &G {
        &self.goods
    }

    /// Returns the order repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates and stores a new order priced from the current goods snapshot.
    ///
    /// Nothing is built or stored when the goods lookup fails.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        buyer_id: BuyerId,
        goods_id: GoodsId,
        item_count: u32,
    ) -> Result<Order, DomainError> {
        let goods = self
            .bounded("goods.require", self.goods.require_goods(goods_id))
            .await?;

        let mut order = Order::new(buyer_id, &goods, item_count)?;

        self.bounded("order.create", self.repository.create(&mut order))
            .await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            order_id = ?order.id(),
            unit_price = %order.unit_price(),
            "order created"
        );

        Ok(order)
    }

    /// Enables a stored order.
    ///
    /// The repository decides whether the transition happens; the in-memory
    /// status only changes after it reports success. Enabling an order twice
    /// fails on the second call.
    #[tracing::instrument(skip(self, order), fields(order_id = ?order.id()))]
    pub async fn enable(&self, order: &mut Order) -> Result<(), DomainError> {
        let Some(order_id) = order.id() else {
            tracing::error!("enable called on an order that was never persisted");
            return Err(DomainError::Precondition(
                "order must be persisted before it can be enabled",
            ));
        };

        let enabled = match self
            .bounded("order.enable", self.repository.enable(order))
            .await
        {
            Ok(enabled) => enabled,
            Err(err) => {
                metrics::counter!("order_enable_failures_total").increment(1);
                tracing::warn!(error = %err, "order enable failed");
                return Err(err);
            }
        };

        if !enabled {
            metrics::counter!("order_enable_failures_total").increment(1);
            return Err(RepositoryError::EnableFailure(order_id).into());
        }

        order.mark_enabled();
        metrics::counter!("orders_enabled_total").increment(1);
        tracing::info!("order enabled");

        Ok(())
    }

    async fn bounded<T, E, F>(&self, operation: &'static str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<DomainError>,
    {
        match self.call_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, call).await {
                Ok(result) => result.map_err(Into::into),
                Err(_) => Err(DomainError::Timeout { operation, timeout }),
            },
            None => call.await.map_err(Into::into),
        }
    }
}
