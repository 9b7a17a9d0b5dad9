//! Order entity, lifecycle and persistence contract.

mod entity;
mod lifecycle;
mod memory;
mod repository;
mod state;

pub use entity::Order;
pub use lifecycle::OrderLifecycle;
pub use memory::InMemoryOrderRepository;
pub use repository::{OrderRepository, RepositoryError};
pub use state::OrderStatus;

use common::Money;
use thiserror::Error;

/// Errors raised by the order entity itself.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Item count must be positive.
    #[error("Invalid item count: {item_count} (must be greater than 0)")]
    InvalidItemCount { item_count: u32 },

    /// Unit price times item count does not fit in the money range.
    #[error("Order total overflows: {unit_price} x {item_count}")]
    TotalOverflow { unit_price: Money, item_count: u32 },

    /// A stored status string is not a known status.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}
