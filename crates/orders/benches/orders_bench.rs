use common::{CorrelationId, Money};
use criterion::{Criterion, criterion_group, criterion_main};
use orders::{InMemoryOrdersStore, OrderDraft, OrdersService, OrdersStore};
use remote::{InMemoryCatalogClient, InMemoryInventoryClient};

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("orders/create_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let inventory = InMemoryInventoryClient::new();
                let catalog = InMemoryCatalogClient::new();
                let item_id = catalog.add_item("Widget", Money::from_cents(1000), "bench");
                inventory.set_level(item_id, 1_000);
                let service =
                    OrdersService::new(InMemoryOrdersStore::new(), inventory, catalog);

                service
                    .create_order(
                        OrderDraft::new(item_id, 1, "new", "bench@example.com"),
                        &CorrelationId::generate(),
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_status_listing(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryOrdersStore::new();
    let inventory = InMemoryInventoryClient::new();
    let catalog = InMemoryCatalogClient::new();
    let item_id = catalog.add_item("Widget", Money::from_cents(1000), "bench");
    inventory.set_level(item_id, 1_000_000);
    let service = OrdersService::new(store, inventory, catalog);

    // Pre-populate: 100 orders in the initial status
    rt.block_on(async {
        for _ in 0..100 {
            service
                .create_order(
                    OrderDraft::new(item_id, 1, "new", "bench@example.com"),
                    &CorrelationId::generate(),
                )
                .await
                .unwrap();
        }
    });

    c.bench_function("orders/list_by_status_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let orders = service.orders_with_status("new").await.unwrap();
                assert_eq!(orders.len(), 100);
            });
        });
    });
}

fn bench_full_order_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("orders/full_place_update_delete", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryOrdersStore::new();
                let inventory = InMemoryInventoryClient::new();
                let catalog = InMemoryCatalogClient::new();
                let item_id = catalog.add_item("Widget", Money::from_cents(1000), "bench");
                inventory.set_level(item_id, 100);
                let service = OrdersService::new(store.clone(), inventory, catalog);
                let correlation = CorrelationId::generate();

                let order = service
                    .create_order(
                        OrderDraft::new(item_id, 2, "new", "bench@example.com"),
                        &correlation,
                    )
                    .await
                    .unwrap();

                service
                    .update_order(
                        order.id,
                        OrderDraft::new(item_id, 2, "shipped", "bench@example.com"),
                    )
                    .await
                    .unwrap();

                service.delete_order(order.id).await.unwrap();
                assert!(store.find_all().await.unwrap().is_empty());
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_status_listing,
    bench_full_order_cycle
);
criterion_main!(benches);
