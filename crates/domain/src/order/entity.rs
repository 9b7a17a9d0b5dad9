//! Order entity.

use chrono::{DateTime, Utc};
use common::{BuyerId, GoodsId, Money, OrderId};

use crate::goods::Goods;

use super::{OrderError, OrderStatus};

/// A single purchase.
///
/// An order without an id is pending: it exists only in memory. It gets an id
/// when a repository stores it, and only a stored order may be enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: Option<OrderId>,
    buyer_id: BuyerId,
    goods_id: GoodsId,
    item_count: u32,
    /// Copied from the goods snapshot at creation; never refreshed.
    unit_price: Money,
    total_price: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a pending order priced from the goods snapshot.
    ///
    /// Fails if the item count is zero or the total does not fit in [`Money`].
    pub fn new(buyer_id: BuyerId, goods: &Goods, item_count: u32) -> Result<Self, OrderError> {
        let total_price = checked_total(goods.price, item_count)?;

        Ok(Self {
            id: None,
            buyer_id,
            goods_id: goods.id,
            item_count,
            unit_price: goods.price,
            total_price,
            status: OrderStatus::Created,
            created_at: Utc::now(),
        })
    }

    /// Rebuilds a stored order, applying the same checks as [`Order::new`].
    pub fn restore(
        id: OrderId,
        buyer_id: BuyerId,
        goods_id: GoodsId,
        item_count: u32,
        unit_price: Money,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let total_price = checked_total(unit_price, item_count)?;

        Ok(Self {
            id: Some(id),
            buyer_id,
            goods_id,
            item_count,
            unit_price,
            total_price,
            status,
            created_at,
        })
    }

    /// Records the id handed out by a repository.
    pub fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    pub(crate) fn mark_enabled(&mut self) {
        self.status = OrderStatus::Enabled;
    }
}

fn checked_total(unit_price: Money, item_count: u32) -> Result<Money, OrderError> {
    if item_count == 0 {
        return Err(OrderError::InvalidItemCount { item_count });
    }
    unit_price
        .multiply(item_count)
        .ok_or(OrderError::TotalOverflow {
            unit_price,
            item_count,
        })
}

// Query methods
impl Order {
    /// Returns the order id, if the order has been stored.
    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    /// Returns true if a repository has stored this order.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
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

    /// Returns the unit price captured at creation.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns unit price times item count.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns when the order was first built.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Goods {
        Goods::new(GoodsId::new(42), "Lamp", Money::from_cents(1999))
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(BuyerId::new(7), &lamp(), 3).unwrap();

        assert_eq!(order.id(), None);
        assert!(!order.is_persisted());
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.unit_price(), Money::from_cents(1999));
        assert_eq!(order.total_price().cents(), 5997);
    }

    #[test]
    fn test_zero_items_rejected() {
        let err = Order::new(BuyerId::new(7), &lamp(), 0).unwrap_err();
        assert!(matches!(err, OrderError::InvalidItemCount { item_count: 0 }));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let goods = Goods::new(GoodsId::new(1), "Yacht", Money::from_cents(10_000_000_000));

        let err = Order::new(BuyerId::new(7), &goods, 4_000_000_000).unwrap_err();

        assert!(matches!(
            err,
            OrderError::TotalOverflow { item_count: 4_000_000_000, .. }
        ));
    }

    #[test]
    fn test_restore_applies_entity_checks() {
        let restore = |item_count, cents| {
            Order::restore(
                OrderId::new(1),
                BuyerId::new(7),
                GoodsId::new(42),
                item_count,
                Money::from_cents(cents),
                OrderStatus::Enabled,
                Utc::now(),
            )
        };

        let order = restore(2, 1999).unwrap();
        assert_eq!(order.total_price(), Money::from_cents(3998));
        assert_eq!(order.status(), OrderStatus::Enabled);

        assert!(matches!(
            restore(0, 1999),
            Err(OrderError::InvalidItemCount { .. })
        ));
        assert!(matches!(
            restore(u32::MAX, i64::MAX),
            Err(OrderError::TotalOverflow { .. })
        ));
    }

    #[test]
    fn test_unit_price_is_a_snapshot() {
        let mut goods = lamp();
        let order = Order::new(BuyerId::new(7), &goods, 1).unwrap();

        goods.price = Money::from_cents(2999);

        assert_eq!(order.unit_price(), Money::from_cents(1999));
    }

    #[test]
    fn test_assign_id_persists() {
        let mut order = Order::new(BuyerId::new(7), &lamp(), 1).unwrap();
        order.assign_id(OrderId::new(11));

        assert!(order.is_persisted());
        assert_eq!(order.id(), Some(OrderId::new(11)));
    }
}
