//! Staff accounts and subscriptions against the embedded database.

mod common;

use pos_server::db::models::{PlanCreate, StaffCreate, StaffRole, StaffUpdate, Subscription};
use pos_server::db::repository::{
    PlanRepository, RepoError, RestaurantRepository, StaffRepository,
};

fn staff_create(username: &str, role: StaffRole) -> StaffCreate {
    StaffCreate {
        username: username.to_string(),
        password: "hunter2-but-longer".to_string(),
        display_name: None,
        role,
    }
}

#[tokio::test]
async fn test_staff_password_is_hashed_and_verifiable() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;

    let repo = StaffRepository::new(db.clone());
    let staff = repo
        .create(&restaurant, staff_create("asha", StaffRole::Admin))
        .await
        .unwrap();

    assert_ne!(staff.hash_pass, "hunter2-but-longer");
    assert!(staff.verify_password("hunter2-but-longer").unwrap());
    assert!(!staff.verify_password("wrong").unwrap());
}

#[tokio::test]
async fn test_username_unique_per_restaurant() {
    let (_dir, db) = common::open_db().await;
    let restaurant_a = common::seed_restaurant(&db, "Spice Villa").await;
    let restaurant_b = common::seed_restaurant(&db, "Curry House").await;

    let repo = StaffRepository::new(db.clone());
    repo.create(&restaurant_a, staff_create("asha", StaffRole::Admin))
        .await
        .unwrap();

    let duplicate = repo
        .create(&restaurant_a, staff_create("asha", StaffRole::Waiter))
        .await;
    assert!(matches!(duplicate, Err(RepoError::Duplicate(_))));

    // Same username in another restaurant is fine
    repo.create(&restaurant_b, staff_create("asha", StaffRole::Admin))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_staff_lookup_scoped_by_restaurant() {
    let (_dir, db) = common::open_db().await;
    let restaurant_a = common::seed_restaurant(&db, "Spice Villa").await;
    let restaurant_b = common::seed_restaurant(&db, "Curry House").await;

    let repo = StaffRepository::new(db.clone());
    let staff = repo
        .create(&restaurant_a, staff_create("asha", StaffRole::Waiter))
        .await
        .unwrap();
    let id = staff.id.unwrap().to_string();

    assert!(repo.find_by_id(&restaurant_a, &id).await.unwrap().is_some());
    assert!(repo.find_by_id(&restaurant_b, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_staff_role_update() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;

    let repo = StaffRepository::new(db.clone());
    let staff = repo
        .create(&restaurant, staff_create("ravi", StaffRole::Waiter))
        .await
        .unwrap();
    let id = staff.id.unwrap().to_string();

    let updated = repo
        .update(
            &restaurant,
            &id,
            StaffUpdate {
                password: None,
                display_name: Some("Ravi K".to_string()),
                role: Some(StaffRole::Manager),
                is_active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, StaffRole::Manager);
    assert_eq!(updated.display_name, "Ravi K");
    // Password untouched
    assert!(updated.verify_password("hunter2-but-longer").unwrap());
}

#[tokio::test]
async fn test_subscription_attach_and_read_back() {
    let (_dir, db) = common::open_db().await;
    let restaurant = common::seed_restaurant(&db, "Spice Villa").await;

    let plans = PlanRepository::new(db.clone());
    let plan = plans
        .create(PlanCreate {
            name: "Monthly".to_string(),
            price: 999.0,
            duration_days: 30,
        })
        .await
        .unwrap();
    let plan_id = plan.id.unwrap();

    let restaurants = RestaurantRepository::new(db.clone());
    let updated = restaurants
        .set_subscription(
            &restaurant,
            Subscription {
                plan: plan_id.clone(),
                started_at: 1_000,
            },
        )
        .await
        .unwrap();

    let subscription = updated.subscription.expect("Subscription not stored");
    assert_eq!(subscription.plan, plan_id);
    assert_eq!(subscription.started_at, 1_000);
}
