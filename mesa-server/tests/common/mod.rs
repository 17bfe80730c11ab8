//! Shared test harness
//!
//! Embedded database in a temp directory plus seeding helpers. The temp
//! directory is held by the harness so the database outlives each test.

#![allow(dead_code)]

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use mesa_server::auth::{AuthContext, AuthRole};
use mesa_server::db::DbService;
use mesa_server::db::models::{
    Customer, CustomerCreate, Food, FoodCreate, PlaceOrderItem, PlaceOrderRequest,
    ReservationType, Shopkeeper, ShopkeeperCreate,
};
use mesa_server::db::repository::{CustomerRepository, FoodRepository, ShopkeeperRepository};
use mesa_server::orders::LifecycleEngine;

pub struct TestEnv {
    _tmp: TempDir,
    pub db: Surreal<Db>,
    pub engine: LifecycleEngine,
}

pub async fn setup() -> TestEnv {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("mesa.db");
    let service = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("database");
    let engine = LifecycleEngine::new(service.db.clone());
    TestEnv {
        _tmp: tmp,
        db: service.db,
        engine,
    }
}

pub async fn seed_customer(db: &Surreal<Db>, name: &str) -> Customer {
    CustomerRepository::new(db.clone())
        .create(CustomerCreate {
            name: name.to_string(),
            email: format!("{name}@example.com"),
        })
        .await
        .expect("seed customer")
}

pub async fn seed_shopkeeper(db: &Surreal<Db>, name: &str, restaurant_name: &str) -> Shopkeeper {
    ShopkeeperRepository::new(db.clone())
        .create(ShopkeeperCreate {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            restaurant_name: restaurant_name.to_string(),
        })
        .await
        .expect("seed shopkeeper")
}

pub async fn seed_food(db: &Surreal<Db>, owner: &Shopkeeper, name: &str, price: f64) -> Food {
    FoodRepository::new(db.clone())
        .create(
            owner.id.clone().expect("shopkeeper id"),
            FoodCreate {
                name: name.to_string(),
                price,
                description: None,
                category: None,
                image_url: None,
                is_special: None,
                tags: vec![],
            },
        )
        .await
        .expect("seed food")
}

pub fn customer_ctx(customer: &Customer) -> AuthContext {
    AuthContext {
        id: customer.id.clone().expect("customer id").to_string(),
        name: customer.name.clone(),
        role: AuthRole::Customer,
    }
}

pub fn shopkeeper_ctx(shopkeeper: &Shopkeeper) -> AuthContext {
    AuthContext {
        id: shopkeeper.id.clone().expect("shopkeeper id").to_string(),
        name: shopkeeper.name.clone(),
        role: AuthRole::Shopkeeper,
    }
}

pub fn order_request(
    restaurant: &Shopkeeper,
    items: &[(&Food, i32)],
    reservation_type: Option<ReservationType>,
) -> PlaceOrderRequest {
    PlaceOrderRequest {
        restaurant_id: restaurant.id.clone().expect("shopkeeper id").to_string(),
        items: items
            .iter()
            .map(|(food, quantity)| PlaceOrderItem {
                food_id: food.id.clone().expect("food id").to_string(),
                quantity: Some(*quantity),
            })
            .collect(),
        reservation_type,
        special_instructions: None,
        delivery_address: None,
        phone: None,
        payment_method: None,
    }
}
