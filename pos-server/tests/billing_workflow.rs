//! Pricing and billing against the embedded database: space overrides,
//! bill number uniqueness and net-profit reporting.

mod common;

use std::collections::HashMap;

use pos_server::billing;
use pos_server::db::models::{Bill, BillLine, SpacePriceSet};
use pos_server::db::repository::{BillRepository, RepoError, SpacePriceRepository};
use pos_server::pricing::PriceResolver;
use surrealdb::RecordId;

fn bill(restaurant: &RecordId, table: &RecordId, bill_no: &str, items: Vec<BillLine>) -> Bill {
    let subtotal: f64 = items.iter().map(|l| l.price * l.quantity as f64).sum();
    Bill {
        id: None,
        restaurant: restaurant.clone(),
        dining_table: table.clone(),
        space: None,
        bill_no: bill_no.to_string(),
        items,
        subtotal,
        discount: 0.0,
        charges: 0.0,
        total: subtotal,
        persons: 2,
        created_by: "staff:asha".to_string(),
        created_at: 10_000,
    }
}

fn item_line(item: &RecordId, name: &str, price: f64, quantity: i32) -> BillLine {
    BillLine {
        item: Some(item.clone()),
        name: name.to_string(),
        price,
        quantity,
        discount: 0.0,
    }
}

#[tokio::test]
async fn test_space_override_resolution() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (rooftop, _table) = common::seed_layout(&db, &restaurant).await;
    let (hall, _other_table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), None).await;

    let prices = SpacePriceRepository::new(db.clone());
    prices
        .set(
            &restaurant,
            &item.id.as_ref().unwrap().to_string(),
            SpacePriceSet {
                space: rooftop.to_string(),
                price: 120.0,
            },
        )
        .await
        .unwrap();

    let resolver = PriceResolver::new(db.clone());
    assert_eq!(resolver.price_for(&item, Some(&rooftop)).await.unwrap(), 120.0);
    assert_eq!(resolver.price_for(&item, Some(&hall)).await.unwrap(), 100.0);
    assert_eq!(resolver.price_for(&item, None).await.unwrap(), 100.0);
}

#[tokio::test]
async fn test_override_replaces_instead_of_stacking() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (rooftop, _table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), None).await;
    let item_id = item.id.as_ref().unwrap().to_string();

    let prices = SpacePriceRepository::new(db.clone());
    for value in [120.0, 140.0] {
        prices
            .set(
                &restaurant,
                &item_id,
                SpacePriceSet {
                    space: rooftop.to_string(),
                    price: value,
                },
            )
            .await
            .unwrap();
    }

    let overrides = prices.find_by_item(&restaurant, &item_id).await.unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].price, 140.0);
}

#[tokio::test]
async fn test_duplicate_bill_no_rejected() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), None).await;
    let item_id = item.id.as_ref().unwrap();

    let repo = BillRepository::new(db.clone());
    repo.create(bill(
        &restaurant,
        &table,
        "B-001",
        vec![item_line(item_id, "paneer", 100.0, 1)],
    ))
    .await
    .unwrap();

    let second = repo
        .create(bill(
            &restaurant,
            &table,
            "B-001",
            vec![item_line(item_id, "paneer", 100.0, 2)],
        ))
        .await;
    assert!(matches!(second, Err(RepoError::Duplicate(_))));
}

#[tokio::test]
async fn test_same_bill_no_allowed_across_restaurants() {
    let (_dir, db) = common::open_db().await;
    let restaurant_a = common::seed_restaurant(&db, "Spice Villa").await;
    let restaurant_b = common::seed_restaurant(&db, "Curry House").await;
    let (_sa, table_a) = common::seed_layout(&db, &restaurant_a).await;
    let (_sb, table_b) = common::seed_layout(&db, &restaurant_b).await;
    let item = common::seed_item(&db, &restaurant_a, "paneer", Some(100.0), None).await;
    let item_id = item.id.as_ref().unwrap();

    let repo = BillRepository::new(db.clone());
    repo.create(bill(
        &restaurant_a,
        &table_a,
        "B-001",
        vec![item_line(item_id, "paneer", 100.0, 1)],
    ))
    .await
    .unwrap();

    // Bill numbers are unique per restaurant, not globally
    repo.create(bill(
        &restaurant_b,
        &table_b,
        "B-001",
        vec![item_line(item_id, "paneer", 100.0, 1)],
    ))
    .await
    .unwrap();
}

#[tokio::test]
async fn test_net_profit_against_current_costs() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), Some(40.0)).await;
    let item_id = item.id.clone().unwrap();

    let repo = BillRepository::new(db.clone());
    repo.create(bill(
        &restaurant,
        &table,
        "B-001",
        vec![item_line(&item_id, "paneer", 100.0, 2)],
    ))
    .await
    .unwrap();

    let bills = repo.find_in_range(&restaurant, 0, 20_000).await.unwrap();
    assert_eq!(bills.len(), 1);

    let costs = HashMap::from([(item_id.to_string(), 40.0)]);
    let stats = billing::net_profit(&bills, &costs);
    assert_eq!(stats.revenue, 200.0);
    assert_eq!(stats.cost, 80.0);
    assert_eq!(stats.net_profit, 120.0);
}

#[tokio::test]
async fn test_bill_stats_over_range() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), None).await;
    let item_id = item.id.as_ref().unwrap();

    let repo = BillRepository::new(db.clone());
    repo.create(bill(
        &restaurant,
        &table,
        "B-001",
        vec![item_line(item_id, "paneer", 100.0, 1)],
    ))
    .await
    .unwrap();
    repo.create(bill(
        &restaurant,
        &table,
        "B-002",
        vec![item_line(item_id, "paneer", 100.0, 2)],
    ))
    .await
    .unwrap();

    let bills = repo.find_in_range(&restaurant, 0, 20_000).await.unwrap();
    let stats = billing::bill_stats(&bills);
    assert_eq!(stats.bill_count, 2);
    assert_eq!(stats.revenue, 300.0);
    assert_eq!(stats.average_bill, 150.0);
    assert_eq!(stats.item_count, 2);
    assert_eq!(stats.discount, 0.0);
}

#[tokio::test]
async fn test_bills_outside_range_excluded() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;
    let item = common::seed_item(&db, &restaurant, "paneer", Some(100.0), None).await;
    let item_id = item.id.as_ref().unwrap();

    let repo = BillRepository::new(db.clone());
    repo.create(bill(
        &restaurant,
        &table,
        "B-001",
        vec![item_line(item_id, "paneer", 100.0, 1)],
    ))
    .await
    .unwrap();

    // created_at is 10_000; a window that ends before it sees nothing
    let bills = repo.find_in_range(&restaurant, 0, 5_000).await.unwrap();
    assert!(bills.is_empty());
}
