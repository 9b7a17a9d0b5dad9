use criterion::{Criterion, criterion_group, criterion_main};
use common::{GoodsId, Money};
use domain::{Goods, InMemoryGoodsCatalog, InMemoryOrderRepository, OrderLifecycle};
use purchase::{BuyWorkflow, OrderBuyRequest, OrderBuyService};

fn buy_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let catalog = InMemoryGoodsCatalog::with_goods([Goods::new(
        GoodsId::new(42),
        "Desk lamp",
        Money::from_cents(1999),
    )]);
    let lifecycle = OrderLifecycle::new(catalog, InMemoryOrderRepository::new());
    let service = OrderBuyService::new(BuyWorkflow::new(lifecycle));

    c.bench_function("buy_in_memory", |b| {
        b.to_async(&rt).iter(|| async {
            service
                .buy(OrderBuyRequest {
                    buyer_id: 7,
                    goods_id: 42,
                    item_count: 3,
                })
                .await
                .unwrap()
        });
    });

    c.bench_function("buy_rejected", |b| {
        b.to_async(&rt).iter(|| async {
            service
                .buy(OrderBuyRequest {
                    buyer_id: 7,
                    goods_id: 42,
                    item_count: 0,
                })
                .await
                .unwrap()
        });
    });
}

criterion_group!(benches, buy_benchmark);
criterion_main!(benches);
