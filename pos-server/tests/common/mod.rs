//! Shared test harness: an embedded database in a temp directory plus a
//! seeded restaurant with one space, one table and a small menu.

#![allow(dead_code)]

use pos_server::db::DbService;
use pos_server::db::models::{
    CategoryCreate, DiningTableCreate, MenuItem, MenuItemCreate, Restaurant, SpaceCreate,
};
use pos_server::db::repository::{
    CategoryRepository, DiningTableRepository, MenuItemRepository, RestaurantRepository,
    SpaceRepository,
};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use tempfile::TempDir;

pub async fn open_db() -> (TempDir, Surreal<Db>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("test.db");
    let service = DbService::new(&path.to_string_lossy())
        .await
        .expect("Failed to open test database");
    (dir, service.db)
}

pub async fn seed_restaurant(db: &Surreal<Db>, name: &str) -> RecordId {
    let repo = RestaurantRepository::new(db.clone());
    let restaurant = repo
        .create(Restaurant {
            id: None,
            name: name.to_string(),
            owner_name: "Owner".to_string(),
            phone: None,
            subscription: None,
            is_active: true,
            created_at: 0,
        })
        .await
        .expect("Failed to seed restaurant");
    restaurant.id.expect("Restaurant without id")
}

/// One space with one table inside it; returns (space, table)
pub async fn seed_layout(db: &Surreal<Db>, restaurant: &RecordId) -> (RecordId, RecordId) {
    let spaces = SpaceRepository::new(db.clone());
    let space = spaces
        .create(
            restaurant,
            SpaceCreate {
                name: "Rooftop".to_string(),
                description: None,
            },
        )
        .await
        .expect("Failed to seed space");
    let space_id = space.id.expect("Space without id");

    let tables = DiningTableRepository::new(db.clone());
    let table = tables
        .create(
            restaurant,
            DiningTableCreate {
                name: "T1".to_string(),
                space: space_id.to_string(),
                capacity: Some(4),
            },
        )
        .await
        .expect("Failed to seed table");

    (space_id, table.id.expect("Table without id"))
}

/// A menu item in a fresh category
pub async fn seed_item(
    db: &Surreal<Db>,
    restaurant: &RecordId,
    name: &str,
    base_price: Option<f64>,
    cost: Option<f64>,
) -> MenuItem {
    let categories = CategoryRepository::new(db.clone());
    let category = categories
        .create(
            restaurant,
            CategoryCreate {
                name: format!("{} category", name),
                sort_order: None,
            },
        )
        .await
        .expect("Failed to seed category");

    let items = MenuItemRepository::new(db.clone());
    items
        .create(
            restaurant,
            MenuItemCreate {
                category: category.id.expect("Category without id").to_string(),
                name: name.to_string(),
                base_price,
                price: None,
                cost,
                is_spicy_available: None,
                is_jain_available: None,
                image: None,
                sort_order: None,
            },
        )
        .await
        .expect("Failed to seed menu item")
}
