use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i64,
    pub user_id: i64,
}

#[derive(Debug)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub instructions: &'a str,
    pub minutes_to_complete: i64,
    pub user_id: i64,
}

/// Recipes owned by `user_id`, oldest first.
pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> Result<Vec<Recipe>, StoreError> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT id, title, instructions, minutes_to_complete, user_id
        FROM recipes
        WHERE user_id = $1
        ORDER BY id ASC
    "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Short instructions or an unknown owner surface as `StoreError::Conflict`.
pub async fn create(db: &SqlitePool, new: NewRecipe<'_>) -> Result<Recipe, StoreError> {
    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (title, instructions, minutes_to_complete, user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, instructions, minutes_to_complete, user_id
        "#,
    )
    .bind(new.title)
    .bind(new.instructions)
    .bind(new.minutes_to_complete)
    .bind(new.user_id)
    .fetch_one(db)
    .await?;
    Ok(recipe)
}
