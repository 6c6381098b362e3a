//! Draft lifecycle against the embedded database: save, shared-cart
//! semantics, KOT history persistence and table turnover.

mod common;

use pos_server::db::models::{AuditStamp, CartLineInput, DraftSave, DraftStatus};
use pos_server::db::repository::TableDraftRepository;
use pos_server::drafts;

fn stamp(name: &str) -> AuditStamp {
    AuditStamp {
        staff: format!("staff:{}", name),
        name: name.to_string(),
        at: 1_000,
    }
}

fn line(name: &str, price: f64, quantity: i32) -> CartLineInput {
    CartLineInput {
        item: None,
        name: name.to_string(),
        price,
        quantity,
        note: None,
        is_spicy: false,
        is_jain: false,
    }
}

#[tokio::test]
async fn test_draft_save_and_reload() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;

    let repo = TableDraftRepository::new(db.clone());
    let draft = drafts::apply_save(
        None,
        restaurant.clone(),
        table.clone(),
        DraftSave {
            persons: Some(3),
            cart: vec![line("paneer", 120.0, 2), line("roti", 15.0, 4)],
        },
        stamp("asha"),
        2_000,
    )
    .unwrap();
    repo.save(draft).await.unwrap();

    let loaded = repo
        .get(&restaurant, &table.to_string())
        .await
        .unwrap()
        .expect("Draft not found after save");

    assert_eq!(loaded.cart.len(), 2);
    assert_eq!(loaded.subtotal, 300.0);
    assert_eq!(loaded.total, 300.0);
    assert_eq!(loaded.persons, 3);
    assert_eq!(loaded.status, DraftStatus::Occupied);
}

#[tokio::test]
async fn test_one_draft_per_table() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;

    let repo = TableDraftRepository::new(db.clone());

    for (who, qty) in [("asha", 1), ("ravi", 5)] {
        let existing = repo.get(&restaurant, &table.to_string()).await.unwrap();
        let draft = drafts::apply_save(
            existing,
            restaurant.clone(),
            table.clone(),
            DraftSave {
                persons: None,
                cart: vec![line("dal", 90.0, qty)],
            },
            stamp(who),
            2_000,
        )
        .unwrap();
        repo.save(draft).await.unwrap();
    }

    // Two saves, still exactly one draft; the second write won
    let all = repo.find_all(&restaurant).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].cart[0].quantity, 5);
    assert_eq!(all[0].cart[0].last_updated_by.name, "ravi");
    assert_eq!(all[0].cart[0].added_by.name, "asha");
}

#[tokio::test]
async fn test_kot_history_survives_saves() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;

    let repo = TableDraftRepository::new(db.clone());
    let mut draft = drafts::apply_save(
        None,
        restaurant.clone(),
        table.clone(),
        DraftSave {
            persons: None,
            cart: vec![line("paneer", 120.0, 2)],
        },
        stamp("asha"),
        2_000,
    )
    .unwrap();

    let kot = drafts::send_to_kitchen(&mut draft, 2_100).unwrap();
    repo.save(draft).await.unwrap();

    // A later save keeps the history
    let existing = repo.get(&restaurant, &table.to_string()).await.unwrap();
    let draft = drafts::apply_save(
        existing,
        restaurant.clone(),
        table.clone(),
        DraftSave {
            persons: None,
            cart: vec![line("paneer", 120.0, 2), line("roti", 15.0, 4)],
        },
        stamp("ravi"),
        3_000,
    )
    .unwrap();
    repo.save(draft).await.unwrap();

    let loaded = repo
        .get(&restaurant, &table.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.kot_history.len(), 1);
    assert_eq!(loaded.kot_history[0].id, kot.id);
}

#[tokio::test]
async fn test_mark_printed_persists_once() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;

    let repo = TableDraftRepository::new(db.clone());
    let mut draft = drafts::apply_save(
        None,
        restaurant.clone(),
        table.clone(),
        DraftSave {
            persons: None,
            cart: vec![line("paneer", 120.0, 2)],
        },
        stamp("asha"),
        2_000,
    )
    .unwrap();
    let kot = drafts::send_to_kitchen(&mut draft, 2_100).unwrap();
    repo.save(draft).await.unwrap();

    // Two mark-printed round trips with the same id
    for _ in 0..2 {
        let mut loaded = repo
            .get(&restaurant, &table.to_string())
            .await
            .unwrap()
            .unwrap();
        drafts::mark_printed(&mut loaded, std::slice::from_ref(&kot.id));
        repo.save(loaded).await.unwrap();
    }

    let loaded = repo
        .get(&restaurant, &table.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.printed_kots, vec![kot.id]);
    assert!(loaded.kot_history[0].printed);
}

#[tokio::test]
async fn test_clear_resets_everything() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;
    let (_space, table) = common::seed_layout(&db, &restaurant).await;

    let repo = TableDraftRepository::new(db.clone());
    let mut draft = drafts::apply_save(
        None,
        restaurant.clone(),
        table.clone(),
        DraftSave {
            persons: Some(2),
            cart: vec![line("paneer", 120.0, 2)],
        },
        stamp("asha"),
        2_000,
    )
    .unwrap();
    drafts::send_to_kitchen(&mut draft, 2_100).unwrap();
    repo.save(draft).await.unwrap();

    let cleared = drafts::cleared_draft(restaurant.clone(), table.clone(), 5_000);
    repo.save(cleared).await.unwrap();

    let loaded = repo
        .get(&restaurant, &table.to_string())
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.cart.is_empty());
    assert_eq!(loaded.subtotal, 0.0);
    assert_eq!(loaded.total, 0.0);
    assert_eq!(loaded.persons, 1);
    assert_eq!(loaded.status, DraftStatus::Draft);
    assert!(loaded.kot_history.is_empty());
    assert!(loaded.printed_kots.is_empty());
}

#[tokio::test]
async fn test_drafts_scoped_by_restaurant() {
    let (_dir, db) = common::open_db().await;
    let restaurant_a = common::seed_restaurant(&db, "Spice Villa").await;
    let restaurant_b = common::seed_restaurant(&db, "Curry House").await;
    let (_space, table) = common::seed_layout(&db, &restaurant_a).await;

    let repo = TableDraftRepository::new(db.clone());
    let draft = drafts::apply_save(
        None,
        restaurant_a.clone(),
        table.clone(),
        DraftSave {
            persons: None,
            cart: vec![line("dal", 90.0, 1)],
        },
        stamp("asha"),
        2_000,
    )
    .unwrap();
    repo.save(draft).await.unwrap();

    assert_eq!(repo.find_all(&restaurant_a).await.unwrap().len(), 1);
    assert!(repo.find_all(&restaurant_b).await.unwrap().is_empty());
}
