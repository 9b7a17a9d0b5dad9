use async_trait::async_trait;
use common::OrderId;
use thiserror::Error;

use crate::error::BoxError;

use super::Order;

/// Errors returned by an [`OrderRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The enable update affected no rows: the order is missing, already
    /// enabled, or was enabled by a concurrent caller.
    #[error("order enable failure: order {0}")]
    EnableFailure(OrderId),

    /// `create` was handed an order that already has an id.
    #[error("Order already persisted: {0}")]
    AlreadyPersisted(OrderId),

    /// `enable` was handed an order that was never stored.
    #[error("Order has not been persisted")]
    NotPersisted,

    /// Stored data could not be read back into an order.
    #[error("Corrupt order record {id}: {reason}")]
    Corrupt { id: OrderId, reason: String },

    /// The underlying store failed.
    #[error("Order storage failed: {0}")]
    Backend(#[source] BoxError),
}

/// Durable storage for orders.
///
/// All implementations must be thread-safe. Two concurrent `enable` calls for
/// the same order must not both succeed.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a pending order and assigns its id.
    ///
    /// The order must be `CREATED` and carry no id. On error the caller must
    /// not assume anything was written.
    async fn create(&self, order: &mut Order) -> Result<(), RepositoryError>;

    /// Moves a stored order from `CREATED` to `ENABLED`.
    ///
    /// Returns `Ok(true)` when a record was updated. An update that affects
    /// no rows fails with [`RepositoryError::EnableFailure`].
    async fn enable(&self, order: &Order) -> Result<bool, RepositoryError>;

    /// Loads a stored order by id.
    async fn find(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;
}
