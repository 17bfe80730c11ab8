//! Food Repository
//!
//! Menu reads for validation and display plus shopkeeper menu management.

use super::{BaseRepository, RepoError, RepoResult, record_ref};
use crate::db::models::{Food, FoodCreate, FoodUpdate};
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "food";

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Batch fetch foods by id. Missing ids are silently absent from the
    /// result; order validation compares against the requested set.
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(foods)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        let thing = record_ref(TABLE, id)?;
        let food: Option<Food> = self.base.db().select(thing).await?;
        Ok(food)
    }

    /// All available foods, newest first (public listing)
    pub async fn find_available(&self) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE is_available = true ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// Available menu of one restaurant, grouped by category
    pub async fn menu_of(&self, shopkeeper: &RecordId) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query(
                "SELECT * FROM food WHERE shopkeeper = $shopkeeper AND is_available = true \
                 ORDER BY category",
            )
            .bind(("shopkeeper", shopkeeper.to_string()))
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// Full menu of one shopkeeper, newest first (management listing)
    pub async fn find_by_shopkeeper(&self, shopkeeper: &RecordId) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE shopkeeper = $shopkeeper ORDER BY created_at DESC")
            .bind(("shopkeeper", shopkeeper.to_string()))
            .await?
            .take(0)?;
        Ok(foods)
    }

    pub async fn create(&self, shopkeeper: RecordId, data: FoodCreate) -> RepoResult<Food> {
        let food = Food {
            id: None,
            name: data.name,
            price: data.price,
            description: data.description.unwrap_or_default(),
            category: data.category.unwrap_or_else(|| "General".to_string()),
            is_available: true,
            image_url: data.image_url,
            shopkeeper,
            is_special: data.is_special.unwrap_or(false),
            tags: data.tags,
            created_at: Utc::now().timestamp_millis(),
        };
        let created: Option<Food> = self.base.db().create(TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }

    /// Update a food item, ownership-checked against the acting shopkeeper
    pub async fn update(
        &self,
        id: &str,
        shopkeeper: &RecordId,
        data: FoodUpdate,
    ) -> RepoResult<Food> {
        let thing = record_ref(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .filter(|f| &f.shopkeeper == shopkeeper)
            .ok_or_else(|| RepoError::NotFound(format!("Food {id} not found")))?;

        let name = data.name.unwrap_or(existing.name);
        let price = data.price.unwrap_or(existing.price);
        let description = data.description.unwrap_or(existing.description);
        let category = data.category.unwrap_or(existing.category);
        let is_available = data.is_available.unwrap_or(existing.is_available);
        let image_url = data.image_url.or(existing.image_url);
        let is_special = data.is_special.unwrap_or(existing.is_special);
        let tags = data.tags.unwrap_or(existing.tags);

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET name = $name, price = $price, description = $description, \
                 category = $category, is_available = $is_available, image_url = $image_url, \
                 is_special = $is_special, tags = $tags RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("price", price))
            .bind(("description", description))
            .bind(("category", category))
            .bind(("is_available", is_available))
            .bind(("image_url", image_url))
            .bind(("is_special", is_special))
            .bind(("tags", tags))
            .await?;
        let updated: Vec<Food> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Food {id} not found")))
    }

    /// Hard delete a food item owned by the acting shopkeeper
    pub async fn delete(&self, id: &str, shopkeeper: &RecordId) -> RepoResult<bool> {
        let thing = record_ref(TABLE, id)?;
        let owned = self
            .find_by_id(id)
            .await?
            .filter(|f| &f.shopkeeper == shopkeeper);
        if owned.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
