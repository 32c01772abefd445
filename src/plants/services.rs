use anyhow::Context;
use sqlx::SqlitePool;

use super::{
    dto::PlantPatch,
    repo::{self, Plant},
};
use crate::error::StoreError;

/// Applies `patch` atomically. `Ok(None)` when the plant does not exist; an
/// error leaves the row untouched because the transaction is rolled back on drop.
pub async fn patch_plant(
    db: &SqlitePool,
    id: i64,
    patch: PlantPatch,
) -> Result<Option<Plant>, StoreError> {
    let mut tx = db.begin().await?;

    let Some(mut plant) = repo::find(&mut *tx, id).await? else {
        return Ok(None);
    };
    if let Some(in_stock) = patch.is_in_stock {
        plant = repo::set_in_stock(&mut *tx, id, in_stock).await?;
    }

    tx.commit().await?;
    Ok(Some(plant))
}

/// `Ok(false)` when there was nothing to delete.
pub async fn delete_plant(db: &SqlitePool, id: i64) -> anyhow::Result<bool> {
    let mut tx = db.begin().await.context("begin tx")?;
    let removed = repo::delete(&mut *tx, id).await.context("delete row")?;
    tx.commit().await.context("commit tx")?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::repo::NewPlant;
    use crate::state::AppState;
    use crate::test_support::plant_count;

    async fn seed(db: &SqlitePool, in_stock: bool) -> Plant {
        let new = NewPlant {
            name: "Aloe",
            image: Some("aloe.jpg"),
            price: 11.5,
            is_in_stock: in_stock,
        };
        repo::create(db, new).await.unwrap()
    }

    #[tokio::test]
    async fn patch_toggles_stock_both_ways() {
        let state = AppState::for_tests().await.unwrap();
        let plant = seed(&state.db, true).await;

        let out = PlantPatch { is_in_stock: Some(false) };
        let updated = patch_plant(&state.db, plant.id, out).await.unwrap().unwrap();
        assert!(!updated.is_in_stock);

        let back = PlantPatch { is_in_stock: Some(true) };
        let updated = patch_plant(&state.db, plant.id, back).await.unwrap().unwrap();
        assert!(updated.is_in_stock);

        let stored = repo::find(&state.db, plant.id).await.unwrap().unwrap();
        assert!(stored.is_in_stock);
    }

    #[tokio::test]
    async fn empty_patch_returns_plant_unchanged() {
        let state = AppState::for_tests().await.unwrap();
        let plant = seed(&state.db, false).await;
        let same = patch_plant(&state.db, plant.id, PlantPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same.name, plant.name);
        assert!(!same.is_in_stock);
    }

    #[tokio::test]
    async fn patch_missing_plant_creates_nothing() {
        let state = AppState::for_tests().await.unwrap();
        let patch = PlantPatch { is_in_stock: Some(false) };
        assert!(patch_plant(&state.db, 404, patch).await.unwrap().is_none());
        assert_eq!(plant_count(&state.db).await, 0);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let state = AppState::for_tests().await.unwrap();
        let plant = seed(&state.db, true).await;
        assert!(delete_plant(&state.db, plant.id).await.unwrap());
        assert!(!delete_plant(&state.db, plant.id).await.unwrap());
        assert!(repo::find(&state.db, plant.id).await.unwrap().is_none());
    }
}
