//! Goods snapshot and the lookup contract used when creating orders.

mod catalog;

pub use catalog::InMemoryGoodsCatalog;

use async_trait::async_trait;
use common::{GoodsId, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BoxError;

/// Read-only view of a goods listing at the time it was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goods {
    /// The goods identifier.
    pub id: GoodsId,

    /// Display name.
    pub name: String,

    /// Current unit price.
    pub price: Money,
}

impl Goods {
    /// Creates a goods snapshot.
    pub fn new(id: GoodsId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Errors returned by a [`GoodsLookup`].
#[derive(Debug, Error)]
pub enum LookupError {
    /// No goods exist for the identifier.
    #[error("Goods not found: {0}")]
    NotFound(GoodsId),

    /// The backing service or store failed.
    #[error("Goods lookup failed: {0}")]
    Backend(#[source] BoxError),
}

/// Resolves goods identifiers to their current snapshot.
///
/// Implementations must not have side effects.
#[async_trait]
pub trait GoodsLookup: Send + Sync {
    /// Returns the goods snapshot for `goods_id`.
    ///
    /// Fails with [`LookupError::NotFound`] when the goods do not exist.
    async fn require_goods(&self, goods_id: GoodsId) -> Result<Goods, LookupError>;
}
