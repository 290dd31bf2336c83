use serde::{Serialize, de::DeserializeOwned};

use crate::{
    db::{DbPool, create_pool, run_migrations},
    error::AppResult,
};

/// Durable named slots, one JSON document each.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: DbPool,
}

impl LocalStore {
    pub async fn open(database_url: &str) -> AppResult<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// A private store that disappears when dropped. Each call is isolated.
    pub async fn in_memory() -> AppResult<Self> {
        Self::open("sqlite::memory:").await
    }

    pub async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    pub async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE
            SET value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns whether the slot existed.
    pub async fn remove_item(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slots_round_trip_and_overwrite() -> anyhow::Result<()> {
        let store = LocalStore::in_memory().await?;
        assert_eq!(store.get_item("products").await?, None);

        store.set_item("products", "[]").await?;
        store.set_item("products", "[1]").await?;
        assert_eq!(store.get_item("products").await?.as_deref(), Some("[1]"));

        assert!(store.remove_item("products").await?);
        assert!(!store.remove_item("products").await?);
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_stores_are_isolated() -> anyhow::Result<()> {
        let a = LocalStore::in_memory().await?;
        let b = LocalStore::in_memory().await?;
        a.set_json("products", &vec!["x"]).await?;
        assert_eq!(b.get_json::<Vec<String>>("products").await?, None);
        Ok(())
    }
}
