//! Buy result.

use common::{BuyerId, GoodsId, Money, OrderId};
use domain::{DomainError, Order, OrderStatus};

/// Outcome of a successful buy: a snapshot of the stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyResult {
    order_id: OrderId,
    buyer_id: BuyerId,
    goods_id: GoodsId,
    item_count: u32,
    unit_price: Money,
    total_price: Money,
    status: OrderStatus,
}

impl BuyResult {
    /// Builds a result from a stored order.
    ///
    /// Fails with a precondition error if the order has no id.
    pub fn from_order(order: &Order) -> Result<Self, DomainError> {
        let order_id = order.id().ok_or(DomainError::Precondition(
            "buy result requires a persisted order",
        ))?;

        Ok(Self {
            order_id,
            buyer_id: order.buyer_id(),
            goods_id: order.goods_id(),
            item_count: order.item_count(),
            unit_price: order.unit_price(),
            total_price: order.total_price(),
            status: order.status(),
        })
    }

    /// Returns the id the repository assigned.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the buyer.
    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    /// Returns the purchased goods.
    pub fn goods_id(&self) -> GoodsId {
        self.goods_id
    }

    /// Returns the number of items bought.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Returns the unit price captured when the order was built.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns unit price times item count.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the order status at the end of the buy.
    pub fn status(&self) -> OrderStatus {
        self.status
    }
}
