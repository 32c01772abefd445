use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub is_in_stock: bool,
}

#[derive(Debug)]
pub struct NewPlant<'a> {
    pub name: &'a str,
    pub image: Option<&'a str>,
    pub price: f64,
    pub is_in_stock: bool,
}

// Executors are generic so the same queries run on the pool or inside a
// transaction (`&mut *tx`).

pub async fn find<'e, E>(db: E, id: i64) -> Result<Option<Plant>, StoreError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let plant = sqlx::query_as::<_, Plant>(
        r#"
        SELECT id, name, image, price, is_in_stock
        FROM plants
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(plant)
}

pub async fn create<'e, E>(db: E, new: NewPlant<'_>) -> Result<Plant, StoreError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let plant = sqlx::query_as::<_, Plant>(
        r#"
        INSERT INTO plants (name, image, price, is_in_stock)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, image, price, is_in_stock
        "#,
    )
    .bind(new.name)
    .bind(new.image)
    .bind(new.price)
    .bind(new.is_in_stock)
    .fetch_one(db)
    .await?;
    Ok(plant)
}

pub async fn set_in_stock<'e, E>(db: E, id: i64, in_stock: bool) -> Result<Plant, StoreError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let plant = sqlx::query_as::<_, Plant>(
        r#"
        UPDATE plants
           SET is_in_stock = $1
         WHERE id = $2
        RETURNING id, name, image, price, is_in_stock
        "#,
    )
    .bind(in_stock)
    .bind(id)
    .fetch_one(db)
    .await?;
    Ok(plant)
}

/// Returns whether a row was removed.
pub async fn delete<'e, E>(db: E, id: i64) -> Result<bool, StoreError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query("DELETE FROM plants WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
