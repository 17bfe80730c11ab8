//! Order lifecycle integration tests
//!
//! Drive the engine end to end against an embedded database: placement
//! with menu validation, table assignment with the occupancy guard,
//! completion and the cancellation/deletion rules.

mod common;

use common::{customer_ctx, order_request, seed_customer, seed_food, seed_shopkeeper, setup,
    shopkeeper_ctx};
use mesa_server::db::models::{CancelledBy, OrderStatus, ReservationType};
use mesa_server::utils::AppError;

#[tokio::test]
async fn place_order_computes_total_and_initial_status() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;
    let soup = seed_food(&env.db, &shopkeeper, "Soup", 5.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(
                &shopkeeper,
                &[(&pasta, 2), (&soup, 1)],
                Some(ReservationType::DineIn),
            ),
        )
        .await
        .expect("place order");

    assert_eq!(order.total_price, 25.0);
    assert_eq!(order.status, OrderStatus::TableRequested);
    assert_eq!(order.items.len(), 2);
    assert!(order.table_number.is_none());
    assert!(order.id.is_some());
}

#[tokio::test]
async fn takeaway_order_starts_pending() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&shopkeeper, &[(&pasta, 1)], None),
        )
        .await
        .expect("place order");

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.reservation_type, ReservationType::Takeaway);
}

#[tokio::test]
async fn place_order_rejects_unknown_food() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let mut req = order_request(&shopkeeper, &[(&pasta, 1)], None);
    req.items[0].food_id = "food:doesnotexist".to_string();

    let err = env
        .engine
        .place_order(&customer_ctx(&customer), req)
        .await
        .expect_err("unknown food must fail");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn place_order_rejects_cross_restaurant_food() {
    let env = setup().await;
    let trattoria = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let bistro = seed_shopkeeper(&env.db, "cy", "Bistro").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &trattoria, "Pasta", 10.0).await;
    let crepe = seed_food(&env.db, &bistro, "Crepe", 7.0).await;

    let err = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&trattoria, &[(&pasta, 1), (&crepe, 1)], None),
        )
        .await
        .expect_err("foreign food must fail");

    match err {
        AppError::Validation(msg) => assert!(msg.contains("not from this restaurant")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn place_order_rejects_empty_items() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;

    let req = order_request(&shopkeeper, &[], None);
    let err = env
        .engine
        .place_order(&customer_ctx(&customer), req)
        .await
        .expect_err("empty order must fail");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn assign_table_seats_the_order() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");

    let view = env
        .engine
        .assign_table(&shopkeeper_ctx(&shopkeeper), &order.id.unwrap().to_string(), 5)
        .await
        .expect("assign table");

    assert_eq!(view.status, OrderStatus::TableAssigned);
    assert_eq!(view.table_number, Some(5));
    assert!(view.table_assigned_at.is_some());
    assert_eq!(view.customer.name, "ada");
}

#[tokio::test]
async fn assign_table_rejects_occupied_table() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let ada = seed_customer(&env.db, "ada").await;
    let eve = seed_customer(&env.db, "eve").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let first = env
        .engine
        .place_order(
            &customer_ctx(&ada),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("first order");
    let second = env
        .engine
        .place_order(
            &customer_ctx(&eve),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("second order");

    let ctx = shopkeeper_ctx(&shopkeeper);
    env.engine
        .assign_table(&ctx, &first.id.unwrap().to_string(), 3)
        .await
        .expect("first assignment");

    let err = env
        .engine
        .assign_table(&ctx, &second.id.unwrap().to_string(), 3)
        .await
        .expect_err("occupied table must conflict");
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn reseating_the_same_order_is_allowed() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");
    let order_id = order.id.unwrap().to_string();

    let ctx = shopkeeper_ctx(&shopkeeper);
    env.engine
        .assign_table(&ctx, &order_id, 5)
        .await
        .expect("seat at 5");

    // same order, same table: not a conflict with itself
    env.engine
        .assign_table(&ctx, &order_id, 5)
        .await
        .expect("reseat at 5");

    // moving to a free table stays legal too
    let view = env
        .engine
        .assign_table(&ctx, &order_id, 6)
        .await
        .expect("move to 6");
    assert_eq!(view.table_number, Some(6));
}

#[tokio::test]
async fn mark_done_frees_the_table() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let ada = seed_customer(&env.db, "ada").await;
    let eve = seed_customer(&env.db, "eve").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let first = env
        .engine
        .place_order(
            &customer_ctx(&ada),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("first order");
    let ctx = shopkeeper_ctx(&shopkeeper);
    let first_id = first.id.unwrap().to_string();
    env.engine
        .assign_table(&ctx, &first_id, 8)
        .await
        .expect("assign");

    let done = env.engine.mark_done(&ctx, &first_id).await.expect("done");
    assert_eq!(done.status, OrderStatus::Done);
    assert!(done.table_number.is_none());
    assert!(done.table_assigned_at.is_none());

    // table 8 is free again for the next order
    let second = env
        .engine
        .place_order(
            &customer_ctx(&eve),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("second order");
    env.engine
        .assign_table(&ctx, &second.id.unwrap().to_string(), 8)
        .await
        .expect("table 8 reusable");
}

#[tokio::test]
async fn mark_done_requires_an_assigned_table() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");

    let err = env
        .engine
        .mark_done(&shopkeeper_ctx(&shopkeeper), &order.id.unwrap().to_string())
        .await
        .expect_err("unassigned order cannot be done");
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn customer_can_cancel_before_assignment() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let ctx = customer_ctx(&customer);
    let order = env
        .engine
        .place_order(
            &ctx,
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");

    let cancelled = env
        .engine
        .cancel_order(&ctx, &order.id.unwrap().to_string())
        .await
        .expect("cancel");

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancelled_by, Some(CancelledBy::User));
    assert!(cancelled.cancel_reason.is_some());
}

#[tokio::test]
async fn cancel_is_blocked_after_assignment() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let ctx = customer_ctx(&customer);
    let order = env
        .engine
        .place_order(
            &ctx,
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");
    let order_id = order.id.unwrap().to_string();

    env.engine
        .assign_table(&shopkeeper_ctx(&shopkeeper), &order_id, 2)
        .await
        .expect("assign");

    let err = env
        .engine
        .cancel_order(&ctx, &order_id)
        .await
        .expect_err("assigned orders cannot be cancelled");
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn cancel_requires_the_owning_customer() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let ada = seed_customer(&env.db, "ada").await;
    let eve = seed_customer(&env.db, "eve").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&ada),
            order_request(&shopkeeper, &[(&pasta, 1)], None),
        )
        .await
        .expect("place order");

    let err = env
        .engine
        .cancel_order(&customer_ctx(&eve), &order.id.unwrap().to_string())
        .await
        .expect_err("strangers cannot cancel");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn restaurant_can_delete_pending_requests_only() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let ctx = shopkeeper_ctx(&shopkeeper);
    let customer_ctx = customer_ctx(&customer);

    let pending = env
        .engine
        .place_order(
            &customer_ctx,
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("pending order");
    let pending_id = pending.id.unwrap().to_string();

    env.engine
        .delete_order_request(&ctx, &pending_id)
        .await
        .expect("delete pending request");
    assert!(env.engine.restaurant_orders(&ctx).await.unwrap().is_empty());

    let seated = env
        .engine
        .place_order(
            &customer_ctx,
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("second order");
    let seated_id = seated.id.unwrap().to_string();
    env.engine
        .assign_table(&ctx, &seated_id, 4)
        .await
        .expect("assign");

    let err = env
        .engine
        .delete_order_request(&ctx, &seated_id)
        .await
        .expect_err("assigned orders cannot be deleted");
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn restaurant_operations_check_ownership() {
    let env = setup().await;
    let trattoria = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let bistro = seed_shopkeeper(&env.db, "cy", "Bistro").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &trattoria, "Pasta", 10.0).await;

    let order = env
        .engine
        .place_order(
            &customer_ctx(&customer),
            order_request(&trattoria, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");
    let order_id = order.id.unwrap().to_string();

    let err = env
        .engine
        .assign_table(&shopkeeper_ctx(&bistro), &order_id, 1)
        .await
        .expect_err("foreign restaurant must be rejected");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn listings_resolve_names_and_order_newest_first() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let ctx = customer_ctx(&customer);
    env.engine
        .place_order(&ctx, order_request(&shopkeeper, &[(&pasta, 2)], None))
        .await
        .expect("place order");

    let mine = env.engine.my_orders(&ctx).await.expect("my orders");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].restaurant.restaurant_name, "Trattoria");
    assert_eq!(mine[0].items[0].name, "Pasta");
    assert_eq!(mine[0].total_price, 20.0);

    let theirs = env
        .engine
        .restaurant_orders(&shopkeeper_ctx(&shopkeeper))
        .await
        .expect("restaurant orders");
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].customer.name, "ada");
    assert_eq!(theirs[0].customer.email, "ada@example.com");
}

#[tokio::test]
async fn customer_cannot_use_restaurant_operations() {
    let env = setup().await;
    let shopkeeper = seed_shopkeeper(&env.db, "bo", "Trattoria").await;
    let customer = seed_customer(&env.db, "ada").await;
    let pasta = seed_food(&env.db, &shopkeeper, "Pasta", 10.0).await;

    let ctx = customer_ctx(&customer);
    let order = env
        .engine
        .place_order(
            &ctx,
            order_request(&shopkeeper, &[(&pasta, 1)], Some(ReservationType::DineIn)),
        )
        .await
        .expect("place order");

    let err = env
        .engine
        .assign_table(&ctx, &order.id.unwrap().to_string(), 1)
        .await
        .expect_err("customers cannot assign tables");
    assert!(matches!(err, AppError::Forbidden(_)));
}
