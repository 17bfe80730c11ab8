//! Order Lifecycle Engine
//!
//! Coordinates order creation with menu validation, transactional
//! persistence, table assignment and the completion/cancellation rules.
//! Every operation takes the caller identity explicitly; authorization
//! and status preconditions are re-checked at the moment of mutation.
//!
//! Status machine driven here:
//!
//! ```text
//! Pending/TableRequested --assign_table--> TableAssigned
//! TableAssigned --mark_done--> Done
//! any non-TableAssigned --cancel (customer)--> Cancelled
//! any non-TableAssigned --delete_request (restaurant)--> removed
//! ```

use std::collections::HashMap;

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::auth::AuthContext;
use crate::db::models::{
    AssignedTableView, CancelledBy, Customer, CustomerOrderView, CustomerRef, Food, Order,
    OrderItem, OrderItemView, PlaceOrderRequest, PublicFood, RestaurantOrderView, RestaurantRef,
    Shopkeeper, TableOccupancy,
};
use crate::db::repository::{
    CustomerRepository, FoodRepository, OrderRepository, ShopkeeperRepository, record_ref,
};
use crate::orders::board::{self, TableStatusEntry};
use crate::utils::{AppError, AppResult};

/// Reason recorded on customer self-cancellation
const USER_CANCEL_REASON: &str = "Cancelled by user before table assignment";

/// The order/table lifecycle core
#[derive(Clone)]
pub struct LifecycleEngine {
    orders: OrderRepository,
    foods: FoodRepository,
    customers: CustomerRepository,
    shopkeepers: ShopkeeperRepository,
}

impl LifecycleEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            foods: FoodRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            shopkeepers: ShopkeeperRepository::new(db),
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Place an order or request a table
    ///
    /// Validates every referenced food against the menu of the target
    /// restaurant, computes the creation-time total and persists the
    /// order atomically. Dine-in orders start as `TableRequested`,
    /// everything else as `Pending`.
    pub async fn place_order(
        &self,
        ctx: &AuthContext,
        req: PlaceOrderRequest,
    ) -> AppResult<Order> {
        let customer = ctx.customer_id()?;

        if req.items.is_empty() {
            return Err(AppError::validation("No food items provided"));
        }

        let restaurant = record_ref("shopkeeper", &req.restaurant_id)?;

        // Parse line items up front, then batch fetch the referenced
        // foods in one query
        let mut parsed: Vec<(RecordId, i32)> = Vec::with_capacity(req.items.len());
        let mut refs: Vec<RecordId> = Vec::new();
        for item in &req.items {
            let food_ref = record_ref("food", &item.food_id)?;
            if !refs.contains(&food_ref) {
                refs.push(food_ref.clone());
            }
            parsed.push((food_ref, item.quantity.unwrap_or(1).max(1)));
        }
        let foods = self.foods.find_by_ids(refs.clone()).await?;
        let foods: HashMap<RecordId, Food> = foods
            .into_iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f)))
            .collect();

        if foods.len() != refs.len() {
            return Err(AppError::validation("Invalid food items"));
        }

        // Cross-restaurant items reject the order as a whole
        for food in foods.values() {
            if food.shopkeeper != restaurant {
                return Err(AppError::validation(format!(
                    "Food '{}' is not from this restaurant",
                    food.name
                )));
            }
        }

        let items: Vec<OrderItem> = parsed
            .into_iter()
            .map(|(food, quantity)| OrderItem { food, quantity })
            .collect();
        let total_price = order_total(&items, &foods);

        let reservation_type = req.reservation_type.unwrap_or_default();
        let now = now_ms();
        let order = Order {
            id: None,
            customer,
            restaurant,
            items,
            total_price,
            status: reservation_type.initial_status(),
            reservation_type,
            table_number: None,
            table_assigned_at: None,
            special_instructions: req.special_instructions,
            delivery_address: req.delivery_address,
            phone: req.phone,
            payment_method: req.payment_method,
            cancelled_by: None,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create(order).await?;
        tracing::info!(
            order = %created.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            total = total_price,
            "order placed"
        );
        Ok(created)
    }

    // =========================================================================
    // Listings (read-shaping projections, no business rules)
    // =========================================================================

    /// All orders of the calling customer, newest first
    pub async fn my_orders(&self, ctx: &AuthContext) -> AppResult<Vec<CustomerOrderView>> {
        let customer = ctx.customer_id()?;
        let orders = self.orders.find_by_customer(&customer).await?;
        self.customer_views(orders).await
    }

    /// All orders of the calling restaurant, newest first
    pub async fn restaurant_orders(
        &self,
        ctx: &AuthContext,
    ) -> AppResult<Vec<RestaurantOrderView>> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let orders = self.orders.find_by_restaurant(&shopkeeper).await?;
        self.restaurant_views(orders).await
    }

    /// Assigned tables of the calling restaurant, latest assignment first
    pub async fn assigned_tables(&self, ctx: &AuthContext) -> AppResult<Vec<AssignedTableView>> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let orders = self.orders.find_assigned(&shopkeeper).await?;

        let food_map = self.food_map(&orders).await?;
        let customer_map = self.customer_map(&orders).await?;

        Ok(orders
            .into_iter()
            .filter_map(|order| {
                let table_number = order.table_number?;
                let customer = customer_map.get(&order.customer);
                Some(AssignedTableView {
                    order_id: record_id_string(&order.id),
                    table_number,
                    customer_name: customer.map(|c| c.name.clone()).unwrap_or_default(),
                    customer_email: customer.map(|c| c.email.clone()).unwrap_or_default(),
                    total_price: order.total_price,
                    status: order.status,
                    assigned_at: order.table_assigned_at,
                    special_instructions: order.special_instructions.clone(),
                    items: item_views(&order.items, &food_map),
                })
            })
            .collect())
    }

    /// Occupancy of the fixed 40-table board of the calling restaurant
    pub async fn table_status(&self, ctx: &AuthContext) -> AppResult<Vec<TableStatusEntry>> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let orders = self.orders.find_assigned(&shopkeeper).await?;
        let customer_map = self.customer_map(&orders).await?;

        let occupancies: Vec<TableOccupancy> = orders
            .iter()
            .map(|order| {
                let customer = customer_map.get(&order.customer);
                TableOccupancy {
                    table_number: order.table_number,
                    table_assigned_at: order.table_assigned_at,
                    customer_name: customer.map(|c| c.name.clone()),
                    customer_email: customer.map(|c| c.email.clone()),
                }
            })
            .collect();

        Ok(board::build_board(&occupancies))
    }

    /// Every available food across restaurants, restaurant names resolved
    pub async fn public_foods(&self) -> AppResult<Vec<PublicFood>> {
        let foods = self.foods.find_available().await?;
        self.public_views(foods).await
    }

    /// One food with its restaurant name resolved
    pub async fn public_food(&self, id: &str) -> AppResult<Option<PublicFood>> {
        match self.foods.find_by_id(id).await? {
            Some(food) => Ok(self.public_views(vec![food]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Seat an order at a table
    ///
    /// The table must not be held by another active order of the same
    /// restaurant; re-seating the same order elsewhere stays legal.
    pub async fn assign_table(
        &self,
        ctx: &AuthContext,
        order_id: &str,
        table_number: i32,
    ) -> AppResult<RestaurantOrderView> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let (_order, id) = self.owned_by_restaurant(order_id, &shopkeeper).await?;

        if let Some(occupant) = self
            .orders
            .table_occupant(&shopkeeper, table_number, &id)
            .await?
        {
            tracing::warn!(
                order = %id,
                occupant = %record_id_string(&occupant.id),
                table_number,
                "table already occupied"
            );
            return Err(AppError::conflict(format!(
                "Table {table_number} is already occupied"
            )));
        }

        let updated = self.orders.assign_table(&id, table_number, now_ms()).await?;
        self.single_restaurant_view(updated).await
    }

    /// Complete an assigned order and free its table
    pub async fn mark_done(
        &self,
        ctx: &AuthContext,
        order_id: &str,
    ) -> AppResult<RestaurantOrderView> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let (order, id) = self.owned_by_restaurant(order_id, &shopkeeper).await?;

        if !order.status.is_table_assigned() {
            return Err(AppError::invalid_transition(
                "Only assigned tables can be marked done",
            ));
        }

        let updated = self.orders.mark_done(&id, now_ms()).await?;
        self.single_restaurant_view(updated).await
    }

    /// Customer self-cancellation, blocked once a table is assigned
    pub async fn cancel_order(&self, ctx: &AuthContext, order_id: &str) -> AppResult<Order> {
        let customer = ctx.customer_id()?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if order.customer != customer {
            return Err(AppError::forbidden("Not authorized"));
        }
        if order.status.is_table_assigned() {
            return Err(AppError::invalid_transition(
                "Cannot cancel after table assignment",
            ));
        }

        let id = required_id(&order.id)?;
        let cancelled = self
            .orders
            .cancel(&id, CancelledBy::User, USER_CANCEL_REASON, now_ms())
            .await?;
        Ok(cancelled)
    }

    /// Restaurant-side removal of a still-pending request (hard delete)
    pub async fn delete_order_request(&self, ctx: &AuthContext, order_id: &str) -> AppResult<()> {
        let shopkeeper = ctx.shopkeeper_id()?;
        let (order, id) = self.owned_by_restaurant(order_id, &shopkeeper).await?;

        if order.status.is_table_assigned() {
            return Err(AppError::invalid_transition(
                "Cannot delete after table assignment",
            ));
        }

        self.orders.delete(&id).await?;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Fetch an order and check restaurant ownership
    async fn owned_by_restaurant(
        &self,
        order_id: &str,
        shopkeeper: &RecordId,
    ) -> AppResult<(Order, RecordId)> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
        if &order.restaurant != shopkeeper {
            return Err(AppError::forbidden("Not authorized"));
        }
        let id = required_id(&order.id)?;
        Ok((order, id))
    }

    async fn single_restaurant_view(&self, order: Order) -> AppResult<RestaurantOrderView> {
        let mut views = self.restaurant_views(vec![order]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Order projection produced no view"))
    }

    /// Resolve restaurant names onto foods for the public menu reads
    async fn public_views(&self, foods: Vec<Food>) -> AppResult<Vec<PublicFood>> {
        let mut refs: Vec<RecordId> = Vec::new();
        for food in &foods {
            if !refs.contains(&food.shopkeeper) {
                refs.push(food.shopkeeper.clone());
            }
        }
        let shopkeeper_map: HashMap<RecordId, Shopkeeper> = if refs.is_empty() {
            HashMap::new()
        } else {
            self.shopkeepers
                .find_by_ids(refs)
                .await?
                .into_iter()
                .filter_map(|s| s.id.clone().map(|id| (id, s)))
                .collect()
        };

        Ok(foods
            .into_iter()
            .map(|food| PublicFood {
                id: record_id_string(&food.id),
                name: food.name,
                price: food.price,
                description: food.description,
                category: food.category,
                image_url: food.image_url,
                is_special: food.is_special,
                tags: food.tags,
                restaurant_name: shopkeeper_map
                    .get(&food.shopkeeper)
                    .map(|s| s.restaurant_name.clone()),
            })
            .collect())
    }

    async fn customer_views(&self, orders: Vec<Order>) -> AppResult<Vec<CustomerOrderView>> {
        let food_map = self.food_map(&orders).await?;

        let mut restaurant_refs: Vec<RecordId> = Vec::new();
        for order in &orders {
            if !restaurant_refs.contains(&order.restaurant) {
                restaurant_refs.push(order.restaurant.clone());
            }
        }
        let shopkeeper_map: HashMap<RecordId, Shopkeeper> = self
            .shopkeepers
            .find_by_ids(restaurant_refs)
            .await?
            .into_iter()
            .filter_map(|s| s.id.clone().map(|id| (id, s)))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let restaurant_name = shopkeeper_map
                    .get(&order.restaurant)
                    .map(|s| s.restaurant_name.clone())
                    .unwrap_or_default();
                CustomerOrderView {
                    id: record_id_string(&order.id),
                    restaurant: RestaurantRef {
                        id: order.restaurant.to_string(),
                        restaurant_name,
                    },
                    items: item_views(&order.items, &food_map),
                    total_price: order.total_price,
                    status: order.status,
                    reservation_type: order.reservation_type,
                    table_number: order.table_number,
                    table_assigned_at: order.table_assigned_at,
                    special_instructions: order.special_instructions,
                    created_at: order.created_at,
                    updated_at: order.updated_at,
                }
            })
            .collect())
    }

    async fn restaurant_views(&self, orders: Vec<Order>) -> AppResult<Vec<RestaurantOrderView>> {
        let food_map = self.food_map(&orders).await?;
        let customer_map = self.customer_map(&orders).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let customer = customer_map.get(&order.customer);
                RestaurantOrderView {
                    id: record_id_string(&order.id),
                    customer: CustomerRef {
                        id: order.customer.to_string(),
                        name: customer.map(|c| c.name.clone()).unwrap_or_default(),
                        email: customer.map(|c| c.email.clone()).unwrap_or_default(),
                    },
                    items: item_views(&order.items, &food_map),
                    total_price: order.total_price,
                    status: order.status,
                    reservation_type: order.reservation_type,
                    table_number: order.table_number,
                    table_assigned_at: order.table_assigned_at,
                    special_instructions: order.special_instructions,
                    created_at: order.created_at,
                    updated_at: order.updated_at,
                }
            })
            .collect())
    }

    /// Batch resolve every food referenced by the given orders
    async fn food_map(&self, orders: &[Order]) -> AppResult<HashMap<RecordId, Food>> {
        let mut refs: Vec<RecordId> = Vec::new();
        for order in orders {
            for item in &order.items {
                if !refs.contains(&item.food) {
                    refs.push(item.food.clone());
                }
            }
        }
        if refs.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .foods
            .find_by_ids(refs)
            .await?
            .into_iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f)))
            .collect())
    }

    /// Batch resolve every customer referenced by the given orders
    async fn customer_map(&self, orders: &[Order]) -> AppResult<HashMap<RecordId, Customer>> {
        let mut refs: Vec<RecordId> = Vec::new();
        for order in orders {
            if !refs.contains(&order.customer) {
                refs.push(order.customer.clone());
            }
        }
        if refs.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .customers
            .find_by_ids(refs)
            .await?
            .into_iter()
            .filter_map(|c| c.id.clone().map(|id| (id, c)))
            .collect())
    }
}

/// Creation-time order total: sum of unit price times quantity
///
/// Quantities below 1 count as 1, matching the creation path.
fn order_total(items: &[OrderItem], foods: &HashMap<RecordId, Food>) -> f64 {
    items
        .iter()
        .map(|item| {
            let price = foods.get(&item.food).map(|f| f.price).unwrap_or(0.0);
            price * item.quantity.max(1) as f64
        })
        .sum()
}

fn item_views(items: &[OrderItem], foods: &HashMap<RecordId, Food>) -> Vec<OrderItemView> {
    items
        .iter()
        .map(|item| {
            // the menu item may have been deleted since the order was placed
            let food = foods.get(&item.food);
            OrderItemView {
                food_id: item.food.to_string(),
                name: food.map(|f| f.name.clone()).unwrap_or_default(),
                price: food.map(|f| f.price).unwrap_or(0.0),
                image_url: food.and_then(|f| f.image_url.clone()),
                quantity: item.quantity,
            }
        })
        .collect()
}

fn record_id_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|i| i.to_string()).unwrap_or_default()
}

fn required_id(id: &Option<RecordId>) -> AppResult<RecordId> {
    id.clone()
        .ok_or_else(|| AppError::internal("Stored order is missing its id"))
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(key: &str, price: f64) -> Food {
        Food {
            id: Some(RecordId::from_table_key("food", key)),
            name: key.to_string(),
            price,
            description: String::new(),
            category: "General".to_string(),
            is_available: true,
            image_url: None,
            shopkeeper: RecordId::from_table_key("shopkeeper", "s1"),
            is_special: false,
            tags: vec![],
            created_at: 0,
        }
    }

    fn item(key: &str, quantity: i32) -> OrderItem {
        OrderItem {
            food: RecordId::from_table_key("food", key),
            quantity,
        }
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let foods: HashMap<RecordId, Food> = [food("a", 10.0), food("b", 5.0)]
            .into_iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f)))
            .collect();
        let items = vec![item("a", 2), item("b", 1)];
        assert_eq!(order_total(&items, &foods), 25.0);
    }

    #[test]
    fn total_clamps_quantity_to_one() {
        let foods: HashMap<RecordId, Food> = [food("a", 8.0)]
            .into_iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f)))
            .collect();
        let items = vec![item("a", 0)];
        assert_eq!(order_total(&items, &foods), 8.0);
    }

    #[test]
    fn item_views_resolve_food_details() {
        let foods: HashMap<RecordId, Food> = [food("a", 4.5)]
            .into_iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f)))
            .collect();
        let views = item_views(&[item("a", 3)], &foods);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "a");
        assert_eq!(views[0].price, 4.5);
        assert_eq!(views[0].quantity, 3);
    }
}
