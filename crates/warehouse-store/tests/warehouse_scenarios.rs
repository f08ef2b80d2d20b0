//! End-to-end store scenarios against a real data file.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use chrono::{Duration, Local, NaiveDate};
use warehouse_core::{ElectronicsProduct, FoodProduct, Product};
use warehouse_store::{
    CodecError, JsonFileStorage, ProductStorage, StorageError, Warehouse, WarehouseConfig,
    WarehouseError,
};

fn open_at(path: &Path) -> Warehouse {
    let mut config = WarehouseConfig::with_data_path(path);
    config.monitor.enabled = false;
    Warehouse::open(config).unwrap()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[test]
fn total_value_of_bread_and_charger() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));

    warehouse.add_product(FoodProduct::new(3001, "Хлеб", 45.50, 4, today() + Duration::days(2)));
    warehouse.add_product(ElectronicsProduct::new(3002, "Зарядка 65W", 1490.0, 2, 6));

    assert!((warehouse.total_value() - 3162.0).abs() < 0.01);

    // Zero price or zero quantity leaves the total alone
    warehouse.add_product(ElectronicsProduct::new(3003, "Sample", 0.0, 9, 0));
    warehouse.add_product(ElectronicsProduct::new(3004, "Out of stock", 99.0, 0, 0));
    assert!((warehouse.total_value() - 3162.0).abs() < 0.01);
}

#[test]
fn add_then_remove_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));

    warehouse.add_product(FoodProduct::new(1001, "Молоко 3.2%", 89.90, 10, today() + Duration::days(12)));
    warehouse.add_product(ElectronicsProduct::new(2001, "Poco X6", 18990.0, 1, 12));
    warehouse.add_product(ElectronicsProduct::new(2002, "Poco X6", 18990.0, 1, 12));

    warehouse.remove_product(2001);

    let ids: Vec<i32> = warehouse.all_products().iter().map(Product::id).collect();
    assert_eq!(ids, [1001, 2002]);
    assert_eq!(warehouse.search_by_name("Poco").len(), 1);
}

#[test]
fn remove_missing_id_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));
    warehouse.add_product(ElectronicsProduct::new(1, "Tablet", 25000.0, 1, 12));
    let before = warehouse.all_products();

    warehouse.remove_product(999_999);

    assert_eq!(warehouse.all_products(), before);
}

#[test]
fn search_ignores_case_for_cyrillic() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));

    warehouse.add_product(FoodProduct::new(4001, "Бананы Эквадор", 129.0, 8, today() + Duration::days(5)));
    warehouse.add_product(ElectronicsProduct::new(4002, "Банановый чехол", 490.0, 3, 0));
    warehouse.add_product(FoodProduct::new(4003, "Яблоки", 99.0, 5, today() + Duration::days(9)));

    let found = warehouse.search_by_name("БАНАН");
    let ids: Vec<i32> = found.iter().map(Product::id).collect();
    assert_eq!(ids, [4001, 4002]);

    assert!(warehouse.search_by_name("груша").is_empty());
}

#[test]
fn type_counts_sum_to_size() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));

    warehouse.add_product(FoodProduct::new(1, "Сыр", 650.0, 1, today()));
    warehouse.add_product(FoodProduct::new(2, "Кефир", 75.0, 2, today()));
    warehouse.add_product(ElectronicsProduct::new(3, "Пылесос", 12000.0, 1, 24));

    let counts = warehouse.product_type_counts();
    assert_eq!(counts.get("FoodProduct"), Some(&2));
    assert_eq!(counts.get("ElectronicsProduct"), Some(&1));
    assert_eq!(counts.values().sum::<usize>(), warehouse.len());
}

#[test]
fn expired_is_strictly_before_today() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("warehouse.json"));

    warehouse.add_product(FoodProduct::new(1, "Вчерашний хлеб", 30.0, 1, today() - Duration::days(1)));
    warehouse.add_product(FoodProduct::new(2, "Сегодняшний хлеб", 45.0, 1, today()));
    warehouse.add_product(FoodProduct::new(3, "Завтрашний хлеб", 50.0, 1, today() + Duration::days(1)));
    warehouse.add_product(ElectronicsProduct::new(4, "Тостер", 3000.0, 1, 12));

    let expired = warehouse.expired_food_products();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].info.id, 1);
}

#[test]
fn saved_file_reloads_in_a_new_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");

    let first = open_at(&path);
    first.add_product(FoodProduct::new(1, "Мёд", 540.0, 3, NaiveDate::from_ymd_opt(2028, 6, 1).unwrap()));
    first.add_product(ElectronicsProduct::new(2, "Колонка", 4990.0, 1, 18));
    first.shutdown();

    let second = open_at(&path);
    assert!(second.is_empty());
    second.load_data();

    assert_eq!(second.all_products(), first.all_products());
    assert!(std::fs::read_to_string(&path).unwrap().contains("\"type\": \"FoodProduct\""));
}

#[test]
fn load_with_missing_type_fails_and_keeps_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");
    let warehouse = open_at(&path);
    warehouse.add_product(ElectronicsProduct::new(7, "Плеер", 2500.0, 1, 6));
    let before = warehouse.all_products();

    std::fs::write(
        &path,
        r#"[
            {"type": "ElectronicsProduct", "id": 1, "name": "A", "price": 1.0, "quantity": 1, "warrantyMonths": 1},
            {"id": 2, "name": "B", "price": 1.0, "quantity": 1, "expirationDate": "2030-01-01"}
        ]"#,
    )
    .unwrap();

    let err = warehouse.try_load_data().unwrap_err();
    assert!(matches!(
        err,
        WarehouseError::Storage(StorageError::Codec(CodecError::MissingTag { index: 1, .. }))
    ));
    assert_eq!(warehouse.all_products(), before);

    warehouse.load_data();
    assert_eq!(warehouse.all_products(), before);
}

#[test]
fn missing_data_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = open_at(&dir.path().join("never-written.json"));

    warehouse.load_data();
    assert!(warehouse.is_empty());
}

#[test]
fn unknown_tag_rejects_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");
    std::fs::write(
        &path,
        r#"[{"type": "ClothingProduct", "id": 1, "name": "Hat", "price": 1.0, "quantity": 1}]"#,
    )
    .unwrap();

    let err = JsonFileStorage::standard().load(&path).unwrap_err();
    assert!(matches!(
        err,
        StorageError::Codec(CodecError::UnknownTag { index: 0, ref label }) if label == "ClothingProduct"
    ));
}

#[tokio::test]
async fn store_runs_with_monitor_inside_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse =
        Warehouse::open(WarehouseConfig::with_data_path(dir.path().join("warehouse.json"))).unwrap();
    assert!(warehouse.is_monitoring());

    warehouse.add_product(FoodProduct::new(1, "Творог", 120.0, 2, today() - Duration::days(3)));
    assert_eq!(warehouse.expired_food_products().len(), 1);

    warehouse.shutdown();
    assert!(!warehouse.is_monitoring());
}

#[test]
fn failed_save_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");
    let warehouse = open_at(&path);

    warehouse.add_product(ElectronicsProduct::new(1, "Роутер", 3290.0, 2, 12));
    let saved = std::fs::read(&path).unwrap();

    warehouse.add_product(ElectronicsProduct::new(2, "Broken", f64::INFINITY, 1, 0));
    assert_eq!(warehouse.len(), 2);
    assert_eq!(std::fs::read(&path).unwrap(), saved);

    let err = JsonFileStorage::standard()
        .save(&warehouse.all_products(), &path)
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Codec(CodecError::NonFiniteValue { index: 1, .. })
    ));

    let fresh = open_at(&path);
    assert_eq!(fresh.try_load_data().unwrap(), 1);
    assert_eq!(fresh.all_products()[0].name(), "Роутер");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_writers_and_readers_lose_no_updates() {
    const WRITERS: i32 = 8;
    const PER_WRITER: i32 = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");
    let mut config = WarehouseConfig::with_data_path(&path);
    config.monitor.interval_secs = 1;
    let warehouse = Arc::new(Warehouse::open(config).unwrap());
    assert!(warehouse.is_monitoring());

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let warehouse = Arc::clone(&warehouse);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut reads = 0usize;
            while !done.load(Ordering::SeqCst) {
                let snapshot = warehouse.all_products();
                let ids: HashSet<i32> = snapshot.iter().map(Product::id).collect();
                assert_eq!(ids.len(), snapshot.len());
                assert!(snapshot.len() <= (WRITERS * PER_WRITER) as usize);

                assert!(warehouse.total_value() >= 0.0);
                let _ = warehouse.search_by_name("item");
                let counted: usize = warehouse.product_type_counts().values().sum();
                assert!(counted <= (WRITERS * PER_WRITER) as usize);
                let _ = warehouse.expired_food_products();
                reads += 1;
            }
            reads
        })
    };

    let writers: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let warehouse = Arc::clone(&warehouse);
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    let id = writer * 1000 + i;
                    if i % 2 == 0 {
                        warehouse.add_product(FoodProduct::new(
                            id,
                            format!("food item {id}"),
                            10.0,
                            1,
                            today() - Duration::days(1),
                        ));
                    } else {
                        warehouse.add_product(ElectronicsProduct::new(
                            id,
                            format!("gadget item {id}"),
                            100.0,
                            2,
                            12,
                        ));
                    }
                    if i % 5 == 0 {
                        warehouse.remove_product(id);
                    }
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    assert!(reader.join().unwrap() > 0);

    let expected: HashSet<i32> = (0..WRITERS)
        .flat_map(|w| (0..PER_WRITER).filter(|i| i % 5 != 0).map(move |i| w * 1000 + i))
        .collect();
    let products = warehouse.all_products();
    let ids: HashSet<i32> = products.iter().map(Product::id).collect();
    assert_eq!(products.len(), expected.len());
    assert_eq!(ids, expected);

    let fresh = open_at(&path);
    assert_eq!(fresh.try_load_data().unwrap(), expected.len());
    assert_eq!(fresh.all_products(), products);

    warehouse.shutdown();
    assert!(!warehouse.is_monitoring());
}
