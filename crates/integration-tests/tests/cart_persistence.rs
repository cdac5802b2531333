//! The storefront controller across simulated page reloads, backed by files.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shreck_core::catalog::{Catalog, CategoryFilter, SortMode};
use shreck_core::ProductId;
use shreck_core::cart::CART_STORAGE_KEY;
use shreck_integration_tests::CATALOG_JSON;
use shreck_storefront::client::{
    Clock, Command, Effect, FileStorage, ManualClock, Storage, Storefront,
};

fn clock() -> Arc<dyn Clock> {
    let start = DateTime::<Utc>::from_timestamp(1_767_000_000, 0).expect("valid timestamp");
    Arc::new(ManualClock::new(start))
}

fn boot(storage: FileStorage) -> Storefront<FileStorage> {
    let catalog = Catalog::from_json(CATALOG_JSON).expect("valid catalog");
    Storefront::boot(storage, catalog, clock()).expect("boot storefront")
}

fn add(storefront: &mut Storefront<FileStorage>, id: &str) {
    let product = storefront
        .catalog()
        .get(&ProductId::new(id))
        .expect("product in catalog")
        .to_cart_product();
    storefront
        .dispatch(Command::AddItem(product))
        .expect("add item");
}

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut first = boot(FileStorage::new(dir.path()));
    add(&mut first, "p1");
    add(&mut first, "p1");
    add(&mut first, "p3");
    first
        .dispatch(Command::Increment(ProductId::new("p3")))
        .expect("increment");
    let before = first.cart().clone();
    drop(first);

    let second = boot(FileStorage::new(dir.path()));
    assert_eq!(second.cart(), &before);

    let ids: Vec<&str> = second.cart().lines().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p3"]);
    assert_eq!(second.cart_view().item_count, 4);
    assert_eq!(second.cart_view().subtotal, "69,98\u{a0}€");
}

#[test]
fn test_malformed_records_dropped_on_reload() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join(CART_STORAGE_KEY),
        r#"[{"id":"p1","name":"Camiseta","price":19.99,"quantity":1},{"id":"p2","name":"Sudadera"}]"#,
    )
    .expect("seed storage");

    let storefront = boot(FileStorage::new(dir.path()));

    assert_eq!(storefront.cart().len(), 1);
    let saved = storefront
        .storage()
        .get(CART_STORAGE_KEY)
        .expect("read storage")
        .expect("cart saved");
    let saved: serde_json::Value = serde_json::from_str(&saved).expect("saved JSON");
    assert_eq!(
        saved,
        serde_json::json!([{"id": "p1", "name": "Camiseta", "price": 19.99, "quantity": 1}])
    );
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join(CART_STORAGE_KEY), "not json at all").expect("seed storage");

    let mut storefront = boot(FileStorage::new(dir.path()));
    assert!(storefront.cart().is_empty());
    assert!(storefront.cart_view().is_empty);

    add(&mut storefront, "p5");
    let reloaded = boot(FileStorage::new(dir.path()));
    assert_eq!(reloaded.cart().totals().items, 1);
}

#[test]
fn test_emptying_cart_persists_empty_list() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut storefront = boot(FileStorage::new(dir.path()));
    add(&mut storefront, "p1");

    let effects = storefront
        .dispatch(Command::Decrement(ProductId::new("p1")))
        .expect("decrement");
    assert!(matches!(effects.as_slice(), [Effect::CartSynced(view)] if view.is_empty));

    let saved = std::fs::read_to_string(dir.path().join(CART_STORAGE_KEY)).expect("saved cart");
    assert_eq!(saved, "[]");
}

#[test]
fn test_filters_do_not_touch_cart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut storefront = boot(FileStorage::new(dir.path()));
    add(&mut storefront, "p3");

    storefront
        .dispatch(Command::SetCategory(CategoryFilter::parse("accesorios")))
        .expect("set category");
    let effects = storefront
        .dispatch(Command::SetSort(SortMode::Name))
        .expect("set sort");

    let [Effect::ProductsFiltered(grid)] = effects.as_slice() else {
        panic!("expected a grid update, got {effects:?}");
    };
    assert_eq!(grid.visible, [ProductId::new("p3"), ProductId::new("p5")]);
    assert_eq!(storefront.cart().totals().items, 1);
}
