use crate::auth::repo_types::{NewUser, User};
use crate::error::StoreError;
use sqlx::SqlitePool;

impl User {
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by username. Usernames are unique, so at most one row matches.
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a user. A taken username surfaces as `StoreError::Conflict`.
    pub async fn create(db: &SqlitePool, new: NewUser<'_>) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, image_url, bio)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, image_url, bio
            "#,
        )
        .bind(new.username)
        .bind(new.password_hash)
        .bind(new.image_url)
        .bind(new.bio)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::test_support::users_named;

    fn new_user(username: &str) -> NewUser<'_> {
        NewUser {
            username,
            password_hash: "$argon2id$placeholder",
            image_url: None,
            bio: Some("likes ferns"),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let state = AppState::for_tests().await.unwrap();
        let created = User::create(&state.db, new_user("ivy")).await.unwrap();

        let by_name = User::find_by_username(&state.db, "ivy").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.bio.as_deref(), Some("likes ferns"));

        let by_id = User::find_by_id(&state.db, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "ivy");
        assert!(User::find_by_id(&state.db, created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let state = AppState::for_tests().await.unwrap();
        User::create(&state.db, new_user("ivy")).await.unwrap();
        let err = User::create(&state.db, new_user("ivy")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(users_named(&state.db, "ivy").await, 1);
    }

    #[tokio::test]
    async fn empty_username_is_a_conflict() {
        let state = AppState::for_tests().await.unwrap();
        let err = User::create(&state.db, new_user("")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
