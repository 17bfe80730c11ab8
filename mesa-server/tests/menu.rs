//! Menu store integration tests
//!
//! Food CRUD with shopkeeper ownership checks plus the public read
//! projections.

mod common;

use common::{seed_food, seed_shopkeeper, setup};
use mesa_server::db::models::FoodUpdate;
use mesa_server::db::repository::FoodRepository;

fn no_changes() -> FoodUpdate {
    FoodUpdate {
        name: None,
        price: None,
        description: None,
        category: None,
        is_available: None,
        image_url: None,
        is_special: None,
        tags: None,
    }
}

#[tokio::test]
async fn created_food_gets_defaults() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let food = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    assert_eq!(food.category, "General");
    assert!(food.is_available);
    assert!(!food.is_special);
    assert!(food.created_at > 0);
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let food = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let repo = FoodRepository::new(env.db.clone());
    let updated = repo
        .update(
            &food.id.clone().unwrap().to_string(),
            &shopkeeper.id.clone().unwrap(),
            FoodUpdate {
                price: Some(12.5),
                is_available: Some(false),
                ..no_changes()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "Pasta");
    assert_eq!(updated.price, 12.5);
    assert!(!updated.is_available);
}

#[tokio::test]
async fn update_rejects_foreign_shopkeeper() {
    let env = setup().await;
    let trattoria = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let bistro = seed_shopkeeper(&env.db, "cy", "Bistro").await;
    let food = seed_food(&env.db, &trattoria, "Pasta", 10.0).await;

    let repo = FoodRepository::new(env.db.clone());
    let result = repo
        .update(
            &food.id.clone().unwrap().to_string(),
            &bistro.id.clone().unwrap(),
            FoodUpdate {
                price: Some(1.0),
                ..no_changes()
            },
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn delete_is_ownership_checked() {
    let env = setup().await;
    let trattoria = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let bistro = seed_shopkeeper(&env.db, "cy", "Bistro").await;
    let food = seed_food(&env.db, &trattoria, "Pasta", 10.0).await;
    let food_id = food.id.clone().unwrap().to_string();

    let repo = FoodRepository::new(env.db.clone());
    assert!(
        !repo
            .delete(&food_id, &bistro.id.clone().unwrap())
            .await
            .expect("foreign delete is a no-op")
    );
    assert!(
        repo.delete(&food_id, &trattoria.id.clone().unwrap())
            .await
            .expect("owner delete")
    );
    assert!(
        repo.find_by_id(&food_id)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn public_listing_skips_unavailable_foods() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;
    let soup = seed_food(&env.db, &shopkeeper, "Soup", 5.0).await;

    let repo = FoodRepository::new(env.db.clone());
    repo.update(
        &soup.id.clone().unwrap().to_string(),
        &shopkeeper.id.clone().unwrap(),
        FoodUpdate {
            is_available: Some(false),
            ..no_changes()
        },
    )
    .await
    .expect("disable soup");

    let listing = env.engine.public_foods().await.expect("listing");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "Pasta");
    assert_eq!(listing[0].restaurant_name.as_deref(), Some("Trattoria"));

    let menu = repo
        .menu_of(&shopkeeper.id.clone().unwrap())
        .await
        .expect("menu");
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].id, pasta.id);
}
