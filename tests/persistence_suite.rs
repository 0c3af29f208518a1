mod common;

use std::fs;

use chrono::NaiveDate;
use rupeewise::core::{TransactionStore, STORAGE_KEY};
use rupeewise::ledger::{Context, NewTransaction, PaymentMethod};
use rupeewise::storage::{JsonStorage, StorageBackend};
use uuid::Uuid;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

#[test]
fn mutations_are_mirrored_to_the_slot_file() {
    let base = common::data_dir();
    let mut store = common::open_store(&base);
    let slot = base.join(format!("{STORAGE_KEY}.json"));

    let income = store
        .add(NewTransaction::income(Context::Home, day(1), 1000.0, PaymentMethod::Cash))
        .unwrap()
        .id;
    store
        .add(NewTransaction::expense(Context::School, day(2), 450.0, "Books/Supplies"))
        .unwrap();
    store.remove(income).unwrap();
    store.remove(Uuid::new_v4()).unwrap();

    let reloaded = common::open_store(&base);
    assert_eq!(reloaded.transactions(), store.transactions());
    assert_eq!(reloaded.len(), 1);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&slot).unwrap()).unwrap();
    let record = &raw[0];
    assert_eq!(record["type"], "expense");
    assert_eq!(record["context"], "School");
    assert_eq!(record["category"], "Books/Supplies");
    assert!(record.get("paymentMethod").is_none());
}

#[test]
fn clear_removes_the_slot_file() {
    let base = common::data_dir();
    let mut store = common::open_store(&base);
    store
        .add(NewTransaction::expense(Context::Home, day(3), 80.0, "Water"))
        .unwrap();
    let slot = base.join(format!("{STORAGE_KEY}.json"));
    assert!(slot.exists());

    store.clear().unwrap();
    assert!(!slot.exists());
    assert!(common::open_store(&base).is_empty());
}

#[test]
fn records_written_by_older_sessions_load() {
    let base = common::data_dir();
    let storage = JsonStorage::new(Some(base.clone())).unwrap();
    storage
        .write(
            STORAGE_KEY,
            r#"[
                {"id":"6b0a1d3e-5f55-4c43-9d7e-0c2b9c0f7a11","date":"2024-10-05","amount":1200,
                 "type":"income","context":"Home","category":"Income","paymentMethod":"Bank"},
                {"id":"0e7c1b7a-93a4-4f0c-8a8e-2f7b1d6c5e22","date":"2024-10-06","amount":75.5,
                 "type":"expense","context":"School","category":"Lunch/Snacks","description":"Canteen"}
            ]"#,
        )
        .unwrap();

    let store = TransactionStore::load(Box::new(storage));
    assert_eq!(store.len(), 2);
    assert_eq!(store.transactions()[0].payment_method(), Some(PaymentMethod::Bank));
    assert_eq!(store.transactions()[1].description.as_deref(), Some("Canteen"));
}

#[test]
fn corrupt_slot_starts_empty_and_recovers_on_next_write() {
    let base = common::data_dir();
    let slot = base.join(format!("{STORAGE_KEY}.json"));
    fs::write(&slot, "[{\"id\": 42").unwrap();

    let mut store = common::open_store(&base);
    assert!(store.is_empty());

    store
        .add(NewTransaction::income(Context::School, day(9), 300.0, PaymentMethod::Other))
        .unwrap();
    assert_eq!(common::open_store(&base).len(), 1);
}
