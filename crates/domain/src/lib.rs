//! Domain layer for the order purchase workflow.
//!
//! This crate owns the only business rules in the system:
//! - the `Order` entity and its one-way `CREATED -> ENABLED` lifecycle
//! - the `GoodsLookup` and `OrderRepository` collaborator contracts
//! - `OrderLifecycle`, which drives an order through both transitions
//!
//! In-memory collaborators are provided for tests and local runs.

pub mod error;
pub mod goods;
pub mod order;

pub use common::{BuyerId, GoodsId, Money, OrderId};
pub use error::{BoxError, DomainError, ErrorKind};
pub use goods::{Goods, GoodsLookup, InMemoryGoodsCatalog, LookupError};
pub use order::{
    InMemoryOrderRepository, Order, OrderError, OrderLifecycle, OrderRepository, OrderStatus,
    RepositoryError,
};
