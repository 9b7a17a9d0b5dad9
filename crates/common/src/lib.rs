//! Shared types used across the order purchase crates.

mod money;
mod types;

pub use money::Money;
pub use types::{BuyerId, GoodsId, OrderId};
