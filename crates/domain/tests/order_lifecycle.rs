//! Integration tests for the order lifecycle.
//!
//! These tests drive `OrderLifecycle` against the in-memory collaborators and
//! check the observable contract: what gets stored, which collaborator calls
//! happen, and how the in-memory order changes.

use chrono::Utc;
use domain::{
    BuyerId, DomainError, ErrorKind, Goods, GoodsId, InMemoryGoodsCatalog,
    InMemoryOrderRepository, LookupError, Money, Order, OrderId, OrderLifecycle, OrderRepository,
    OrderStatus, RepositoryError,
};

type TestLifecycle = OrderLifecycle<InMemoryGoodsCatalog, InMemoryOrderRepository>;

/// Helper to create a lifecycle with goods 42 priced at 19.99.
fn create_lifecycle() -> TestLifecycle {
    let catalog = InMemoryGoodsCatalog::with_goods([
        Goods::new(GoodsId::new(42), "Desk lamp", Money::from_cents(1999)),
        Goods::new(GoodsId::new(43), "Bulb", Money::from_cents(250)),
    ]);
    OrderLifecycle::new(catalog, InMemoryOrderRepository::new())
}

mod create {
    use super::*;

    #[tokio::test]
    async fn stores_created_order_with_snapshot_price() {
        let lifecycle = create_lifecycle();

        for (goods_id, price) in [(42, 1999), (43, 250)] {
            let order = lifecycle
                .create(BuyerId::new(7), GoodsId::new(goods_id), 2)
                .await
                .unwrap();

            assert_eq!(order.status(), OrderStatus::Created);
            assert!(order.id().is_some_and(|id| id.is_valid()));
            assert_eq!(order.unit_price(), Money::from_cents(price));
            assert_eq!(order.item_count(), 2);
        }

        assert_eq!(lifecycle.repository().order_count().await, 2);
    }

    #[tokio::test]
    async fn later_price_change_does_not_touch_existing_order() {
        let lifecycle = create_lifecycle();

        let order = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap();

        lifecycle
            .goods()
            .insert(Goods::new(
                GoodsId::new(42),
                "Desk lamp",
                Money::from_cents(2999),
            ))
            .await;

        let stored = lifecycle
            .repository()
            .find(order.id().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.unit_price(), Money::from_cents(1999));
    }

    #[tokio::test]
    async fn unknown_goods_fails_without_repository_call() {
        let lifecycle = create_lifecycle();

        let err = lifecycle
            .create(BuyerId::new(7), GoodsId::new(404), 1)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Goods(LookupError::NotFound(id)) if id == GoodsId::new(404)
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(lifecycle.repository().create_calls().await, 0);
        assert_eq!(lifecycle.repository().order_count().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_is_propagated() {
        let lifecycle = create_lifecycle();
        lifecycle.repository().set_fail_on_create(true).await;

        let err = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Repository(RepositoryError::Backend(_))
        ));
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[tokio::test]
    async fn lookup_backend_failure_is_propagated() {
        let lifecycle = create_lifecycle();
        lifecycle
            .goods()
            .set_failure(Some("goods service unavailable".to_string()))
            .await;

        let err = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Goods lookup failed: goods service unavailable"
        );
        assert_eq!(lifecycle.repository().create_calls().await, 0);
    }
}

mod enable {
    use super::*;

    #[tokio::test]
    async fn persisted_order_becomes_enabled() {
        let lifecycle = create_lifecycle();
        let mut order = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 3)
            .await
            .unwrap();

        lifecycle.enable(&mut order).await.unwrap();

        assert_eq!(order.status(), OrderStatus::Enabled);
        assert_eq!(
            lifecycle
                .repository()
                .stored_status(order.id().unwrap())
                .await,
            Some(OrderStatus::Enabled)
        );
    }

    #[tokio::test]
    async fn pending_order_is_a_precondition_error() {
        let lifecycle = create_lifecycle();
        let goods = Goods::new(GoodsId::new(42), "Desk lamp", Money::from_cents(1999));
        let mut order = Order::new(BuyerId::new(7), &goods, 1).unwrap();

        let err = lifecycle.enable(&mut order).await.unwrap_err();

        assert!(matches!(err, DomainError::Precondition(_)));
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(lifecycle.repository().enable_calls().await, 0);
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[tokio::test]
    async fn zero_rows_is_illegal_state_and_keeps_status() {
        let lifecycle = create_lifecycle();
        // Carries an id but was never stored, so the update matches nothing.
        let mut order = Order::restore(
            OrderId::new(77),
            BuyerId::new(7),
            GoodsId::new(42),
            1,
            Money::from_cents(1999),
            OrderStatus::Created,
            Utc::now(),
        )
        .unwrap();

        let err = lifecycle.enable(&mut order).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Repository(RepositoryError::EnableFailure(id)) if id == OrderId::new(77)
        ));
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(lifecycle.repository().enable_calls().await, 1);
    }

    #[tokio::test]
    async fn unaffected_update_maps_to_enable_failure() {
        let lifecycle = create_lifecycle();
        let mut order = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap();
        let id = order.id().unwrap();
        lifecycle.repository().set_reject_enable(true).await;

        let err = lifecycle.enable(&mut order).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Repository(RepositoryError::EnableFailure(failed)) if failed == id
        ));
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(
            lifecycle.repository().stored_status(id).await,
            Some(OrderStatus::Created)
        );
    }

    /// Enable is deliberately not idempotent: the second call reaches the
    /// repository, affects zero rows and fails.
    #[tokio::test]
    async fn second_enable_fails_with_illegal_state() {
        let lifecycle = create_lifecycle();
        let mut order = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap();
        lifecycle.enable(&mut order).await.unwrap();

        let err = lifecycle.enable(&mut order).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(
            err.to_string(),
            format!("order enable failure: order {}", order.id().unwrap())
        );
        assert_eq!(order.status(), OrderStatus::Enabled);
        assert_eq!(lifecycle.repository().enable_calls().await, 2);
    }

    #[tokio::test]
    async fn stale_copy_cannot_enable_again() {
        let lifecycle = create_lifecycle();
        let mut order = lifecycle
            .create(BuyerId::new(7), GoodsId::new(42), 1)
            .await
            .unwrap();
        let mut stale = order.clone();

        lifecycle.enable(&mut order).await.unwrap();
        let err = lifecycle.enable(&mut stale).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(stale.status(), OrderStatus::Created);
    }
}
