//! Food listing repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Food, FoodFilter, SortOrder};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const FOOD_COLUMNS: &str = "id, food_name, food_image, food_quantity, pickup_location, expired_date, notes, donor_name, donor_image, donor_email, status, created_at, updated_at";

#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn create(&self, food: &Food) -> Result<Food>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Food>>;
    async fn list(&self, filter: &FoodFilter) -> Result<Vec<Food>>;
    async fn list_by_donor(&self, email: &str) -> Result<Vec<Food>>;
    async fn update(&self, food: &Food) -> Result<Food>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqlxFoodRepository {
    pool: DynDatabasePool,
}

impl SqlxFoodRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn FoodRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl FoodRepository for SqlxFoodRepository {
    async fn create(&self, food: &Food) -> Result<Food> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), food).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), food).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Food>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn list(&self, filter: &FoodFilter) -> Result<Vec<Food>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap(), filter).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap(), filter).await,
        }
    }

    async fn list_by_donor(&self, email: &str) -> Result<Vec<Food>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_by_donor_sqlite(self.pool.as_sqlite().unwrap(), email).await
            }
            DatabaseDriver::Mysql => {
                list_by_donor_mysql(self.pool.as_mysql().unwrap(), email).await
            }
        }
    }

    async fn update(&self, food: &Food) -> Result<Food> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_sqlite(self.pool.as_sqlite().unwrap(), food).await,
            DatabaseDriver::Mysql => update_mysql(self.pool.as_mysql().unwrap(), food).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

/// Build the browse query for the given filter. Bind order: search pattern
/// first (when present), then status.
fn build_list_query(filter: &FoodFilter) -> String {
    let mut sql = format!("SELECT {} FROM foods", FOOD_COLUMNS);

    let mut clauses: Vec<&str> = Vec::new();
    if filter.search.is_some() {
        clauses.push("food_name LIKE ?");
    }
    if filter.status.is_some() {
        clauses.push("status = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    match filter.sort {
        Some(SortOrder::Asc) => sql.push_str(" ORDER BY expired_date ASC"),
        Some(SortOrder::Desc) => sql.push_str(" ORDER BY expired_date DESC"),
        None => {}
    }

    sql
}

// SQLite implementations

async fn create_sqlite(pool: &SqlitePool, food: &Food) -> Result<Food> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO foods (food_name, food_image, food_quantity, pickup_location, expired_date, notes, donor_name, donor_image, donor_email, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&food.food_name)
    .bind(&food.food_image)
    .bind(food.food_quantity)
    .bind(&food.pickup_location)
    .bind(food.expired_date)
    .bind(&food.notes)
    .bind(&food.donor_name)
    .bind(&food.donor_image)
    .bind(&food.donor_email)
    .bind(&food.status)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create food listing")?;

    Ok(Food {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..food.clone()
    })
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Food>> {
    let row = sqlx::query(&format!("SELECT {} FROM foods WHERE id = ?", FOOD_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get food listing")?;
    row.map(|r| row_to_food_sqlite(&r)).transpose()
}

async fn list_sqlite(pool: &SqlitePool, filter: &FoodFilter) -> Result<Vec<Food>> {
    let sql = build_list_query(filter);
    let mut query = sqlx::query(&sql);
    if let Some(search) = &filter.search {
        query = query.bind(format!("%{}%", search));
    }
    if let Some(status) = &filter.status {
        query = query.bind(status);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list food listings")?;
    rows.iter().map(row_to_food_sqlite).collect()
}

async fn list_by_donor_sqlite(pool: &SqlitePool, email: &str) -> Result<Vec<Food>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM foods WHERE donor_email = ? ORDER BY created_at DESC",
        FOOD_COLUMNS
    ))
    .bind(email)
    .fetch_all(pool)
    .await
    .context("Failed to list food listings by donor")?;
    rows.iter().map(row_to_food_sqlite).collect()
}

async fn update_sqlite(pool: &SqlitePool, food: &Food) -> Result<Food> {
    let now = Utc::now();
    sqlx::query(
        "UPDATE foods SET food_name = ?, food_image = ?, food_quantity = ?, pickup_location = ?, expired_date = ?, notes = ?, donor_name = ?, donor_image = ?, donor_email = ?, status = ?, updated_at = ? WHERE id = ?"
    )
    .bind(&food.food_name)
    .bind(&food.food_image)
    .bind(food.food_quantity)
    .bind(&food.pickup_location)
    .bind(food.expired_date)
    .bind(&food.notes)
    .bind(&food.donor_name)
    .bind(&food.donor_image)
    .bind(&food.donor_email)
    .bind(&food.status)
    .bind(now)
    .bind(food.id)
    .execute(pool)
    .await
    .context("Failed to update food listing")?;

    get_by_id_sqlite(pool, food.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Food listing not found after update"))
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM foods WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete food listing")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_food_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Food> {
    Ok(Food {
        id: row.try_get("id")?,
        food_name: row.try_get("food_name")?,
        food_image: row.try_get("food_image")?,
        food_quantity: row.try_get("food_quantity")?,
        pickup_location: row.try_get("pickup_location")?,
        expired_date: row.try_get("expired_date")?,
        notes: row.try_get("notes")?,
        donor_name: row.try_get("donor_name")?,
        donor_image: row.try_get("donor_image")?,
        donor_email: row.try_get("donor_email")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// MySQL implementations

async fn create_mysql(pool: &MySqlPool, food: &Food) -> Result<Food> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO foods (food_name, food_image, food_quantity, pickup_location, expired_date, notes, donor_name, donor_image, donor_email, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&food.food_name)
    .bind(&food.food_image)
    .bind(food.food_quantity)
    .bind(&food.pickup_location)
    .bind(food.expired_date)
    .bind(&food.notes)
    .bind(&food.donor_name)
    .bind(&food.donor_image)
    .bind(&food.donor_email)
    .bind(&food.status)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create food listing")?;

    Ok(Food {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..food.clone()
    })
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Food>> {
    let row = sqlx::query(&format!("SELECT {} FROM foods WHERE id = ?", FOOD_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get food listing")?;
    row.map(|r| row_to_food_mysql(&r)).transpose()
}

async fn list_mysql(pool: &MySqlPool, filter: &FoodFilter) -> Result<Vec<Food>> {
    let sql = build_list_query(filter);
    let mut query = sqlx::query(&sql);
    if let Some(search) = &filter.search {
        query = query.bind(format!("%{}%", search));
    }
    if let Some(status) = &filter.status {
        query = query.bind(status);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list food listings")?;
    rows.iter().map(row_to_food_mysql).collect()
}

async fn list_by_donor_mysql(pool: &MySqlPool, email: &str) -> Result<Vec<Food>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM foods WHERE donor_email = ? ORDER BY created_at DESC",
        FOOD_COLUMNS
    ))
    .bind(email)
    .fetch_all(pool)
    .await
    .context("Failed to list food listings by donor")?;
    rows.iter().map(row_to_food_mysql).collect()
}

async fn update_mysql(pool: &MySqlPool, food: &Food) -> Result<Food> {
    let now = Utc::now();
    sqlx::query(
        "UPDATE foods SET food_name = ?, food_image = ?, food_quantity = ?, pickup_location = ?, expired_date = ?, notes = ?, donor_name = ?, donor_image = ?, donor_email = ?, status = ?, updated_at = ? WHERE id = ?"
    )
    .bind(&food.food_name)
    .bind(&food.food_image)
    .bind(food.food_quantity)
    .bind(&food.pickup_location)
    .bind(food.expired_date)
    .bind(&food.notes)
    .bind(&food.donor_name)
    .bind(&food.donor_image)
    .bind(&food.donor_email)
    .bind(&food.status)
    .bind(now)
    .bind(food.id)
    .execute(pool)
    .await
    .context("Failed to update food listing")?;

    get_by_id_mysql(pool, food.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Food listing not found after update"))
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM foods WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete food listing")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_food_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Food> {
    Ok(Food {
        id: row.try_get("id")?,
        food_name: row.try_get("food_name")?,
        food_image: row.try_get("food_image")?,
        food_quantity: row.try_get("food_quantity")?,
        pickup_location: row.try_get("pickup_location")?,
        expired_date: row.try_get("expired_date")?,
        notes: row.try_get("notes")?,
        donor_name: row.try_get("donor_name")?,
        donor_image: row.try_get("donor_image")?,
        donor_email: row.try_get("donor_email")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
